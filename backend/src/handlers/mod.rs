pub mod culture;
