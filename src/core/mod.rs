pub mod battle;
pub mod damage;
pub mod dice;
pub mod factory;
pub mod records;
pub mod replay;
pub mod sim;
pub mod state;
