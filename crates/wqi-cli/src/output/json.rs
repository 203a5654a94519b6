use serde::Serialize;
use wqi_core::error::WqiError;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), WqiError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
