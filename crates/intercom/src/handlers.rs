mod conversations;

pub use conversations::{
    ConversationsHandler, conversation_path, conversation_reply_path,
    conversation_tags_delete_path, conversation_tags_path,
};
