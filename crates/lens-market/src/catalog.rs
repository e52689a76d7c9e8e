//! Static catalog of selectable symbols, grouped by market category

/// A selectable symbol with its human-readable name
#[derive(Debug, Clone, Copy)]
pub struct ListedSymbol {
    pub symbol: &'static str,
    pub name: &'static str,
}

/// A market category grouping related symbols
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub symbols: &'static [ListedSymbol],
}

const STOCKS: &[ListedSymbol] = &[
    ListedSymbol { symbol: "AAPL", name: "Apple Inc." },
    ListedSymbol { symbol: "MSFT", name: "Microsoft Corporation" },
    ListedSymbol { symbol: "GOOGL", name: "Alphabet Inc." },
    ListedSymbol { symbol: "AMZN", name: "Amazon.com Inc." },
    ListedSymbol { symbol: "META", name: "Meta Platforms Inc." },
    ListedSymbol { symbol: "TSLA", name: "Tesla Inc." },
    ListedSymbol { symbol: "NVDA", name: "NVIDIA Corporation" },
    ListedSymbol { symbol: "JPM", name: "JPMorgan Chase & Co." },
];

const FOREX: &[ListedSymbol] = &[
    ListedSymbol { symbol: "EURUSD=X", name: "EUR/USD" },
    ListedSymbol { symbol: "GBPUSD=X", name: "GBP/USD" },
    ListedSymbol { symbol: "USDJPY=X", name: "USD/JPY" },
    ListedSymbol { symbol: "AUDUSD=X", name: "AUD/USD" },
    ListedSymbol { symbol: "USDCAD=X", name: "USD/CAD" },
    ListedSymbol { symbol: "USDCHF=X", name: "USD/CHF" },
];

const CRYPTO: &[ListedSymbol] = &[
    ListedSymbol { symbol: "BTC-USD", name: "Bitcoin USD" },
    ListedSymbol { symbol: "ETH-USD", name: "Ethereum USD" },
    ListedSymbol { symbol: "USDT-USD", name: "Tether USD" },
    ListedSymbol { symbol: "BNB-USD", name: "Binance Coin USD" },
    ListedSymbol { symbol: "XRP-USD", name: "XRP USD" },
    ListedSymbol { symbol: "SOL-USD", name: "Solana USD" },
];

const CATEGORIES: &[Category] = &[
    Category { id: "stocks", name: "Stocks", symbols: STOCKS },
    Category { id: "forex", name: "Forex", symbols: FOREX },
    Category { id: "crypto", name: "Crypto", symbols: CRYPTO },
];

/// All market categories in display order
pub fn market_categories() -> &'static [Category] {
    CATEGORIES
}
