//! cnablib — кодек фиксированной ширины CNAB 240 (ремесса/ретур) для бразильских банков

pub mod error;
pub mod layout;
pub mod model;
pub mod traits;

pub mod banks {
    pub mod banco_brasil;
    pub mod santander;
}
