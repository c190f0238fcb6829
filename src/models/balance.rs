use crate::error::TrackerError;

/// stETH balance in base units. ERC-20 tokens carry 18 fractional decimal
/// digits, so 10^18 base units make one human-readable token.
pub type Balance = u128;

/// Number of fractional decimal digits in an ERC-20 token value.
///
/// See <https://docs.openzeppelin.com/contracts/3.x/erc20#a-note-on-decimals>
pub const ERC20_TOKEN_PRECISION: usize = 18;

/// Render a base-unit value as an exact fixed-point decimal string with 18
/// fractional digits, e.g. `5` becomes `0.000000000000000005` and
/// `1000000000000000000` becomes `1.000000000000000000`.
///
/// Signed input so rebase deltas format the same way balances do; negative
/// values carry a leading `-`. No floating point anywhere.
pub fn format_token_value(value: i128) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format_base_units(sign, value.unsigned_abs())
}

/// Unsigned variant of [`format_token_value`] for balances, which are never
/// negative and may exceed the signed range.
pub fn format_balance(value: Balance) -> String {
    format_base_units("", value)
}

fn format_base_units(sign: &str, magnitude: u128) -> String {
    let digits = magnitude.to_string();

    if digits.len() <= ERC20_TOKEN_PRECISION {
        return format!("{}0.{:0>width$}", sign, digits, width = ERC20_TOKEN_PRECISION);
    }

    let split = digits.len() - ERC20_TOKEN_PRECISION;
    format!("{sign}{}.{}", &digits[..split], &digits[split..])
}

/// Parse the balance file's content back into a [`Balance`].
///
/// Accepts surrounding whitespace (the file is newline-terminated); anything
/// else is [`TrackerError::CorruptState`].
pub fn parse_balance(content: &str) -> Result<Balance, TrackerError> {
    content
        .trim()
        .parse::<Balance>()
        .map_err(|_| TrackerError::CorruptState { content: content.trim().to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_small_values_with_zero_integer_part() {
        assert_eq!(format_token_value(5), "0.000000000000000005");
        assert_eq!(format_token_value(0), "0.000000000000000000");
    }

    #[test]
    fn formats_whole_tokens() {
        assert_eq!(format_token_value(1_000_000_000_000_000_000), "1.000000000000000000");
        assert_eq!(
            format_token_value(12_345_678_900_000_000_000_000),
            "12345.678900000000000000"
        );
    }

    #[test]
    fn formats_negative_deltas() {
        assert_eq!(format_token_value(-100_000_000_000_000_000), "-0.100000000000000000");
        assert_eq!(format_token_value(-1_500_000_000_000_000_000), "-1.500000000000000000");
    }

    #[test]
    fn exactly_eighteen_digits_still_gets_zero_integer_part() {
        assert_eq!(format_token_value(999_999_999_999_999_999), "0.999999999999999999");
    }

    #[test]
    fn formatting_round_trips_through_parse() {
        for value in [0u128, 5, 42, 999_999_999_999_999_999, 1_000_000_000_000_000_000, u128::from(u64::MAX)] {
            let formatted = format_token_value(value as i128);
            let (int_part, frac_part) = formatted.split_once('.').unwrap();
            let recombined: u128 =
                format!("{int_part}{frac_part}").parse().unwrap();
            assert_eq!(recombined, value);
        }
    }

    #[test]
    fn format_balance_handles_values_beyond_the_signed_range() {
        assert_eq!(
            format_balance(u128::MAX),
            "340282366920938463463.374607431768211455"
        );
    }

    #[test]
    fn parses_newline_terminated_balance() {
        assert_eq!(parse_balance("1000000000000000000\n").unwrap(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn rejects_non_numeric_content() {
        let err = parse_balance("abc\n").unwrap_err();
        assert!(matches!(err, TrackerError::CorruptState { content } if content == "abc"));
    }

    #[test]
    fn rejects_negative_balance_content() {
        assert!(parse_balance("-5").is_err());
    }
}
