mod common;
mod objectives;
