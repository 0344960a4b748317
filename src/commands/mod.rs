pub mod init;
pub mod profile;
pub mod verify;
