pub mod viewer_error;
