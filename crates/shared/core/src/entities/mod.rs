mod api_object;
mod clock_status;
mod resource;
mod test_clock;

pub use api_object::ApiObject;
pub use clock_status::ClockStatus;
pub use resource::Resource;
pub use test_clock::{ClockId, TestClock};
