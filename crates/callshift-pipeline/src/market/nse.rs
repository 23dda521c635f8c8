//! NSE symbol registry
//!
//! Maps transcript tickers to the Yahoo Finance symbols of their NSE
//! listings. The table covers the Nifty 50 names the transcript corpus uses;
//! unknown tickers fall back to `{TICKER}.NS`, which is correct for most NSE
//! listings whose ticker matches the exchange symbol.

/// Ticker -> Yahoo Finance NSE symbol, for names whose exchange symbol
/// differs from (or needs punctuation beyond) the transcript ticker
const NSE_SYMBOLS: &[(&str, &str)] = &[
    ("BHARTI", "BHARTIARTL.NS"),
    ("SBI", "SBIN.NS"),
    ("HDFC", "HDFCBANK.NS"),
    ("BAJAJ", "BAJFINANCE.NS"),
    ("RELIANCE", "RELIANCE.NS"),
    ("TCS", "TCS.NS"),
    ("INFOSYS", "INFY.NS"),
    ("ICICI", "ICICIBANK.NS"),
    ("LT", "LT.NS"),
    ("HUL", "HINDUNILVR.NS"),
    ("KOTAKBANK", "KOTAKBANK.NS"),
    ("AXISBANK", "AXISBANK.NS"),
    ("ITC", "ITC.NS"),
    ("HCLTECH", "HCLTECH.NS"),
    ("WIPRO", "WIPRO.NS"),
    ("ULTRACEMCO", "ULTRACEMCO.NS"),
    ("ADANIENT", "ADANIENT.NS"),
    ("ADANIPORTS", "ADANIPORTS.NS"),
    ("TITAN", "TITAN.NS"),
    ("MARUTI", "MARUTI.NS"),
    ("NTPC", "NTPC.NS"),
    ("POWERGRID", "POWERGRID.NS"),
    ("ONGC", "ONGC.NS"),
    ("TATAMOTORS", "TATAMOTORS.NS"),
    ("TATASTEEL", "TATASTEEL.NS"),
    ("SBILIFE", "SBILIFE.NS"),
    ("HDFCLIFE", "HDFCLIFE.NS"),
    ("ICICIPRULI", "ICICIPRULI.NS"),
    ("SUNPHARMA", "SUNPHARMA.NS"),
    ("DRREDDY", "DRREDDY.NS"),
    ("CIPLA", "CIPLA.NS"),
    ("ASIANPAINT", "ASIANPAINT.NS"),
    ("NESTLEIND", "NESTLEIND.NS"),
    ("BAJAJFINSV", "BAJAJFINSV.NS"),
    ("JSWSTEEL", "JSWSTEEL.NS"),
    ("COALINDIA", "COALINDIA.NS"),
    ("INDUSINDBK", "INDUSINDBK.NS"),
    ("HINDALCO", "HINDALCO.NS"),
    ("GRASIM", "GRASIM.NS"),
    ("TECHM", "TECHM.NS"),
    ("EICHERMOT", "EICHERMOT.NS"),
    ("HEROMOTOCO", "HEROMOTOCO.NS"),
    ("TATACONSUM", "TATACONSUM.NS"),
    ("BRITANNIA", "BRITANNIA.NS"),
    ("APOLLOHOSP", "APOLLOHOSP.NS"),
    ("DIVISLAB", "DIVISLAB.NS"),
    ("LTIM", "LTIM.NS"),
    ("MM", "M&M.NS"),
    ("BPCL", "BPCL.NS"),
    ("BAJAJAUTO", "BAJAJ-AUTO.NS"),
];

/// Resolve a transcript ticker to its Yahoo Finance NSE symbol
pub fn nse_symbol(ticker: &str) -> String {
    NSE_SYMBOLS
        .iter()
        .find(|(t, _)| *t == ticker)
        .map(|(_, s)| (*s).to_string())
        .unwrap_or_else(|| format!("{ticker}.NS"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tickers_resolve() {
        assert_eq!(nse_symbol("BHARTI"), "BHARTIARTL.NS");
        assert_eq!(nse_symbol("SBI"), "SBIN.NS");
        assert_eq!(nse_symbol("INFOSYS"), "INFY.NS");
    }

    #[test]
    fn test_punctuated_symbols() {
        assert_eq!(nse_symbol("MM"), "M&M.NS");
        assert_eq!(nse_symbol("BAJAJAUTO"), "BAJAJ-AUTO.NS");
    }

    #[test]
    fn test_unknown_ticker_falls_back_to_ns_suffix() {
        assert_eq!(nse_symbol("ZOMATO"), "ZOMATO.NS");
    }

    #[test]
    fn test_table_has_no_duplicate_tickers() {
        let mut tickers: Vec<&str> = NSE_SYMBOLS.iter().map(|(t, _)| *t).collect();
        tickers.sort_unstable();
        tickers.dedup();
        assert_eq!(tickers.len(), NSE_SYMBOLS.len());
    }
}
