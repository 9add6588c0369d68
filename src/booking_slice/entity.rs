use crate::model::Booking;
use sync_framework::Record;

impl Record for Booking {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}
