mod helpers;
mod login;
mod register;
mod verify_token;
