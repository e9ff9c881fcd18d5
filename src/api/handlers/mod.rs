pub mod health;
pub mod pcb;
