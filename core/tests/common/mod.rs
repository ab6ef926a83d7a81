use iocdrop_core::indicator::{parse_lines, IndicatorItem};

pub fn values(items: &[IndicatorItem]) -> Vec<&str> {
    items.iter().map(|it| it.value.as_str()).collect()
}

pub fn parse_values(input: &str) -> Vec<String> {
    parse_lines(input).into_iter().map(|it| it.value).collect()
}
