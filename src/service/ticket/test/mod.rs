use super::*;

mod naming;
