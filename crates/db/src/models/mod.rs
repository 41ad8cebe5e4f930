pub mod invitation;
pub mod publish_record;
