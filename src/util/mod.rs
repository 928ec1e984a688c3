pub mod serialization_utils;
