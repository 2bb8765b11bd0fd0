pub mod auth_handler;

pub use auth_handler::{
    __path_login, __path_register, __path_register_admin, login, register, register_admin,
};
