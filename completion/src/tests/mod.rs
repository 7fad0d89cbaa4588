#[cfg(test)]
mod test_candidate;
#[cfg(test)]
mod test_config;
#[cfg(test)]
mod test_debounce;
