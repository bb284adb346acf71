mod login;
mod session;

pub use login::{decode_password, encode_password, LoginClient, LOGIN_PATH};
pub use session::{Session, API_KEY_HEADER};
