use crate::model::PublicProperty;
use sync_framework::Record;

impl Record for PublicProperty {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}
