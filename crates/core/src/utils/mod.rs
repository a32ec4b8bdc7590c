pub mod decimal_utils;
pub mod pagination;
pub mod time_utils;
