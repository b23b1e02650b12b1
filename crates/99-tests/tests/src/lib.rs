//! Cross-crate scenarios for the temperature monitor.

#[cfg(test)]
mod end_to_end;

#[cfg(test)]
mod scenarios;
