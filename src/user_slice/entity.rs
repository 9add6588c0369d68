use crate::model::User;
use sync_framework::Record;

impl Record for User {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}
