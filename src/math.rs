use crate::error::MathError;

/// Add two numbers together.
pub fn add(a: f64, b: f64) -> Result<f64, MathError> {
    Ok(a + b)
}

/// Subtract second number from first number.
pub fn subtract(a: f64, b: f64) -> Result<f64, MathError> {
    Ok(a - b)
}

/// Multiply two numbers together.
pub fn multiply(a: f64, b: f64) -> Result<f64, MathError> {
    Ok(a * b)
}

/// Divide first number by second number.
pub fn divide(a: f64, b: f64) -> Result<f64, MathError> {
    if b == 0.0 {
        return Err(MathError::DivisionByZero);
    }
    Ok(a / b)
}
