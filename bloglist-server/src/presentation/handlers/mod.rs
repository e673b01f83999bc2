pub(crate) mod blogs;
pub(crate) mod login;
pub(crate) mod users;
