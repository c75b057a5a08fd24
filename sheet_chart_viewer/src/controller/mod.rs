pub mod http_router;
pub mod main_controller;

#[cfg(test)]
pub(crate) mod test_support;
