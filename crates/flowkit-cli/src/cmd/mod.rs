pub mod install;
pub mod verify;
