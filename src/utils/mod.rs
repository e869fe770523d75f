pub mod code_generator;
pub mod jwt;
pub mod validation;

pub use code_generator::{
    RestaurantCodeLookup, generate_email_verification_code, generate_restaurant_code,
    generate_unique_restaurant_code,
};
pub use jwt::*;
pub use validation::*;
