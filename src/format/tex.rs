use crate::numeric::Numeric;

/// `coef·var` in TeX, hiding a unit coefficient: `x`, `-x`, `3x`, `\frac{1}{2}x`.
pub fn coef_var_tex(coef: &Numeric, var: &str) -> String {
    if coef.is_zero() {
        "0".to_string()
    } else if coef.is_one() {
        var.to_string()
    } else if coef.opposite().is_one() {
        format!("-{var}")
    } else {
        format!("{}{var}", coef.to_tex())
    }
}

/// Same as [`coef_var_tex`] in the plain expression language (`3*x`).
pub fn coef_var_text(coef: &Numeric, var: &str) -> String {
    if coef.is_zero() {
        "0".to_string()
    } else if coef.is_one() {
        var.to_string()
    } else if coef.opposite().is_one() {
        format!("-{var}")
    } else {
        format!("{coef}*{var}")
    }
}

/// Signed continuation of an expression: ` + 3`, ` - 5`; empty for zero.
pub fn append(value: &Numeric) -> String {
    let signed = value.signed_tex();
    if signed.is_empty() {
        signed
    } else {
        format!(" {signed}")
    }
}

pub fn display_power(base: impl std::fmt::Display, exponent: &Numeric) -> String {
    if exponent.is_one() {
        base.to_string()
    } else {
        format!("{base}^{{{}}}", exponent.to_tex())
    }
}

pub fn display_root(index: u32, body: &str) -> String {
    if index == 2 {
        format!("\\sqrt{{{body}}}")
    } else {
        format!("\\sqrt[{index}]{{{body}}}")
    }
}

pub fn parens(body: &str) -> String {
    format!("\\left({body}\\right)")
}

/// `a₁x₁ + … + aₙxₙ + c` in TeX with zero terms dropped.
pub fn linear_combination_tex(terms: &[(Numeric, &str)], constant: &Numeric) -> String {
    let mut out = String::new();
    for (coef, var) in terms {
        if coef.is_zero() {
            continue;
        }
        if out.is_empty() {
            out.push_str(&coef_var_tex(coef, var));
        } else {
            let sign = if coef.is_negative() { " - " } else { " + " };
            out.push_str(sign);
            out.push_str(&coef_var_tex(&coef.abs(), var));
        }
    }
    if out.is_empty() {
        return constant.to_tex();
    }
    out.push_str(&append(constant));
    out
}

pub fn linear_combination_text(terms: &[(Numeric, &str)], constant: &Numeric) -> String {
    let mut out = String::new();
    for (coef, var) in terms {
        if coef.is_zero() {
            continue;
        }
        if out.is_empty() {
            out.push_str(&coef_var_text(coef, var));
        } else {
            let sign = if coef.is_negative() { " - " } else { " + " };
            out.push_str(sign);
            out.push_str(&coef_var_text(&coef.abs(), var));
        }
    }
    if out.is_empty() {
        return constant.to_string();
    }
    if constant.is_negative() {
        out.push_str(&format!(" - {}", constant.abs()));
    } else if !constant.is_zero() {
        out.push_str(&format!(" + {constant}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_combination_skips_zero_terms() {
        let terms = [
            (Numeric::from_number(2), "x"),
            (Numeric::zero(), "y"),
            (Numeric::from_number(-1), "z"),
        ];
        assert_eq!(
            linear_combination_tex(&terms, &Numeric::from_number(-4)),
            "2x - z - 4"
        );
        assert_eq!(
            linear_combination_text(&terms, &Numeric::from_number(-4)),
            "2*x - z - 4"
        );
    }
}
