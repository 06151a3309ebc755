pub mod add_collaborator;
pub mod create_link;
pub mod deactivate_link;
pub mod get_overview;
pub mod inspect_link;
pub mod redeem_link;
pub mod remove_collaborator;
