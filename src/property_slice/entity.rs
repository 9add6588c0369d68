use crate::model::Property;
use sync_framework::Record;

impl Record for Property {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}
