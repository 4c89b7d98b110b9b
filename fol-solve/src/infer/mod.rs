pub mod unify;
