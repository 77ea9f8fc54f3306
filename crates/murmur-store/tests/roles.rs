use murmur_core::models::message::MessageRole;
use murmur_store::error::StoreError;
use murmur_store::messages::validate_server_role;

#[test]
fn user_role_is_rejected_on_the_server_write_path() {
    assert!(matches!(
        validate_server_role(MessageRole::User),
        Err(StoreError::InvalidRole(_))
    ));
}

#[test]
fn server_attributed_roles_are_accepted() {
    for role in [
        MessageRole::Assistant,
        MessageRole::System,
        MessageRole::Tool,
    ] {
        assert!(validate_server_role(role).is_ok(), "{role:?}");
    }
}
