pub mod openobserve;
