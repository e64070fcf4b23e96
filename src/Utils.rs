/// terminal logger setup
pub mod logger;
