pub mod plan;
pub mod raw;
pub mod turn;

pub use plan::{DayPlan, DaySlot, FlightInfo, HotelInfo, Meals, TripPlan, WeatherInfo};
pub use raw::{RawDayPlan, RawFlight, RawHotel, RawMeals, RawPlanDetails, RawTripPlan, RawWeather};
pub use turn::{ConversationTurn, Role};
