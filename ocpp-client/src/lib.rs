pub mod v16;
