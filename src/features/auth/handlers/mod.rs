pub mod auth_handler;

pub use auth_handler::{
    __path_get_me, __path_sign_in, __path_sign_out, get_me, sign_in, sign_out,
};
