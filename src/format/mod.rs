//! Rendering helpers: plain-text expressions and TeX composition.

pub mod expr;
pub mod tex;

pub use expr::pretty;
pub use tex::{
    append, coef_var_tex, coef_var_text, display_power, display_root, linear_combination_tex,
    linear_combination_text, parens,
};
