pub mod hedge;
pub mod scenario;
pub mod var;
