// ═══════════════════════════════════════════════════════════════════
// Model Tests — Holding, metrics, validation, prediction schema, news
// ═══════════════════════════════════════════════════════════════════

use chrono::{DateTime, Utc};
use uuid::Uuid;

use stock_dashboard_core::errors::CoreError;
use stock_dashboard_core::models::history::{StockHistory, TechnicalIndicators};
use stock_dashboard_core::models::holding::{Holding, HoldingInput, HoldingMetrics, HoldingUpdate};
use stock_dashboard_core::models::news::{NewsItem, SentimentLabel};
use stock_dashboard_core::models::portfolio::PortfolioSummary;
use stock_dashboard_core::models::prediction::{
    ConfidenceLevel, Prediction, PredictionResult, TradeAction,
};

fn holding(quantity: f64, purchase_price: f64, current_price: f64) -> Holding {
    Holding::from_input(HoldingInput::new("TCS", "TCS", quantity, purchase_price, current_price))
}

// ═══════════════════════════════════════════════════════════════════
// Holding
// ═══════════════════════════════════════════════════════════════════

mod holding_model {
    use super::*;

    #[test]
    fn from_input_assigns_id_and_timestamp() {
        let before = Utc::now();
        let h = Holding::from_input(HoldingInput::new("INFY", "Infosys", 5.0, 1500.0, 1600.0));
        let after = Utc::now();

        assert!(!h.id.is_nil());
        assert!(h.date_added >= before && h.date_added <= after);
        assert_eq!(h.symbol, "INFY");
        assert_eq!(h.name, "Infosys");
        assert_eq!(h.quantity, 5.0);
        assert_eq!(h.purchase_price, 1500.0);
        assert_eq!(h.current_price, 1600.0);
    }

    #[test]
    fn from_input_ids_are_unique() {
        let a = holding(1.0, 1.0, 1.0);
        let b = holding(1.0, 1.0, 1.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_camel_case_fields() {
        let h = holding(10.0, 100.0, 120.0);
        let json = serde_json::to_value(&h).unwrap();
        let obj = json.as_object().unwrap();

        for key in ["id", "symbol", "name", "quantity", "purchasePrice", "currentPrice", "dateAdded"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 7);
        assert!(json["dateAdded"].is_string());
    }

    #[test]
    fn deserializes_without_id_or_date() {
        let json = r#"{"symbol":"TCS","name":"TCS","quantity":1,"purchasePrice":2,"currentPrice":3}"#;
        let h: Holding = serde_json::from_str(json).unwrap();
        assert!(!h.id.is_nil());
        assert_eq!(h.date_added, DateTime::<Utc>::default());
        assert_eq!(h.current_price, 3.0);
    }

    #[test]
    fn deserializes_browser_iso_timestamp() {
        let json = r#"{"id":"3f0c6f1e-3b8e-4c4f-9a53-0c6b1d4f9e21","symbol":"TCS","name":"TCS",
            "quantity":1,"purchasePrice":2,"currentPrice":3,"dateAdded":"2025-03-01T10:15:30.123Z"}"#;
        let h: Holding = serde_json::from_str(json).unwrap();
        assert_eq!(h.id, Uuid::parse_str("3f0c6f1e-3b8e-4c4f-9a53-0c6b1d4f9e21").unwrap());
        assert_eq!(h.date_added.to_rfc3339(), "2025-03-01T10:15:30.123+00:00");
    }

    #[test]
    fn missing_required_field_fails() {
        let json = r#"{"symbol":"TCS","quantity":1,"purchasePrice":2,"currentPrice":3}"#;
        assert!(serde_json::from_str::<Holding>(json).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Derived metrics
// ═══════════════════════════════════════════════════════════════════

mod metrics {
    use super::*;

    #[test]
    fn profit_example() {
        let m = holding(10.0, 100.0, 120.0).metrics();
        assert_eq!(m.total_value, 1200.0);
        assert_eq!(m.total_cost, 1000.0);
        assert_eq!(m.profit_loss, 200.0);
        assert_eq!(format!("{:.2}", m.profit_loss_percent.unwrap()), "20.00");
        assert!(m.is_profit());
    }

    #[test]
    fn loss_example() {
        let m = holding(2.0, 2500.0, 2300.0).metrics();
        assert_eq!(m.total_value, 4600.0);
        assert_eq!(m.total_cost, 5000.0);
        assert_eq!(m.profit_loss, -400.0);
        assert_eq!(format!("{:.2}", m.profit_loss_percent.unwrap()), "-8.00");
        assert!(!m.is_profit());
    }

    #[test]
    fn break_even_counts_as_profit() {
        let m = holding(3.0, 50.0, 50.0).metrics();
        assert_eq!(m.profit_loss, 0.0);
        assert_eq!(m.profit_loss_percent, Some(0.0));
        assert!(m.is_profit());
    }

    #[test]
    fn zero_cost_has_no_percent() {
        let m = HoldingMetrics::compute(10.0, 0.0, 5.0);
        assert_eq!(m.total_cost, 0.0);
        assert_eq!(m.profit_loss, 50.0);
        assert_eq!(m.profit_loss_percent, None);
    }

    #[test]
    fn fractional_quantity() {
        let m = HoldingMetrics::compute(0.5, 200.0, 300.0);
        assert_eq!(m.total_value, 150.0);
        assert_eq!(m.total_cost, 100.0);
        assert_eq!(m.profit_loss_percent, Some(50.0));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Partial updates
// ═══════════════════════════════════════════════════════════════════

mod updates {
    use super::*;

    #[test]
    fn empty_update_changes_nothing() {
        let mut h = holding(10.0, 100.0, 120.0);
        let before = h.clone();
        let update = HoldingUpdate::default();

        assert!(update.is_empty());
        assert!(!h.apply(&update));
        assert_eq!(h, before);
        assert_eq!(serde_json::to_string(&h).unwrap(), serde_json::to_string(&before).unwrap());
    }

    #[test]
    fn only_supplied_fields_change() {
        let mut h = holding(10.0, 100.0, 120.0);
        let id = h.id;
        let added = h.date_added;

        assert!(h.apply(&HoldingUpdate {
            quantity: Some(12.0),
            name: Some("Tata".into()),
            ..HoldingUpdate::default()
        }));

        assert_eq!(h.quantity, 12.0);
        assert_eq!(h.name, "Tata");
        assert_eq!(h.symbol, "TCS");
        assert_eq!(h.purchase_price, 100.0);
        assert_eq!(h.current_price, 120.0);
        assert_eq!(h.id, id);
        assert_eq!(h.date_added, added);
    }

    #[test]
    fn current_price_helper() {
        let mut h = holding(1.0, 100.0, 120.0);
        h.apply(&HoldingUpdate::current_price(130.0));
        assert_eq!(h.current_price, 130.0);
        assert_eq!(h.purchase_price, 100.0);
    }

    #[test]
    fn update_deserializes_from_partial_json() {
        let update: HoldingUpdate = serde_json::from_str(r#"{"currentPrice": 99.5}"#).unwrap();
        assert_eq!(update.current_price, Some(99.5));
        assert!(update.symbol.is_none());
        assert!(!update.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Input validation
// ═══════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    fn message(err: CoreError) -> String {
        match err {
            CoreError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn normalizes_symbol_and_name() {
        let input = HoldingInput::new("  infy ", " Infosys ", 5.0, 1500.0, 1600.0)
            .validate()
            .unwrap();
        assert_eq!(input.symbol, "INFY");
        assert_eq!(input.name, "Infosys");
    }

    #[test]
    fn empty_symbol_rejected() {
        let err = HoldingInput::new("   ", "Infosys", 1.0, 1.0, 1.0).validate().unwrap_err();
        assert_eq!(message(err), "Symbol is required");
    }

    #[test]
    fn empty_name_rejected() {
        let err = HoldingInput::new("INFY", "", 1.0, 1.0, 1.0).validate().unwrap_err();
        assert_eq!(message(err), "Company name is required");
    }

    #[test]
    fn non_positive_numbers_rejected() {
        let cases = [
            (HoldingInput::new("A", "A", 0.0, 1.0, 1.0), "Quantity must be positive"),
            (HoldingInput::new("A", "A", -1.0, 1.0, 1.0), "Quantity must be positive"),
            (HoldingInput::new("A", "A", 1.0, 0.0, 1.0), "Purchase price must be positive"),
            (HoldingInput::new("A", "A", 1.0, 1.0, -5.0), "Current price must be positive"),
            (HoldingInput::new("A", "A", f64::NAN, 1.0, 1.0), "Quantity must be positive"),
            (HoldingInput::new("A", "A", 1.0, f64::INFINITY, 1.0), "Purchase price must be positive"),
        ];
        for (input, expected) in cases {
            assert_eq!(message(input.validate().unwrap_err()), expected);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Portfolio summary
// ═══════════════════════════════════════════════════════════════════

mod summary {
    use super::*;

    #[test]
    fn empty_portfolio() {
        let s = PortfolioSummary::from_holdings(&[]);
        assert_eq!(s.holding_count, 0);
        assert_eq!(s.total_value, 0.0);
        assert_eq!(s.total_cost, 0.0);
        assert_eq!(s.profit_loss_percent, None);
    }

    #[test]
    fn sums_all_holdings() {
        let holdings = vec![holding(10.0, 100.0, 120.0), holding(2.0, 2500.0, 2300.0)];
        let s = PortfolioSummary::from_holdings(&holdings);
        assert_eq!(s.holding_count, 2);
        assert_eq!(s.total_value, 5800.0);
        assert_eq!(s.total_cost, 6000.0);
        assert_eq!(s.profit_loss, -200.0);
        let pct = s.profit_loss_percent.unwrap();
        assert!((pct - (-200.0 / 6000.0 * 100.0)).abs() < 1e-9);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Prediction schema
// ═══════════════════════════════════════════════════════════════════

mod prediction {
    use super::*;

    #[test]
    fn full_payload() {
        let json = r#"{
            "action": "SELL", "timing": "Sell now", "confidence": 71.0,
            "predictedReturn": -2.5, "currentPrice": 100.0, "predictedPrice": 97.5,
            "volatility": 2.2, "marketSentiment": "Bearish",
            "modelAccuracy": {"train": 0.9, "test": 0.8}
        }"#;
        let p: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(p.action, TradeAction::Sell);
        assert_eq!(p.timing, "Sell now");
        assert_eq!(p.predicted_return, -2.5);
        assert_eq!(p.predicted_price, Some(97.5));
        assert_eq!(p.market_sentiment, "Bearish");
        assert_eq!(p.model_accuracy.train, 0.9);
        assert_eq!(p.model_accuracy.test, 0.8);
        assert_eq!(p.confidence_level(), ConfidenceLevel::Medium);
    }

    #[test]
    fn empty_object_takes_defaults() {
        let p: Prediction = serde_json::from_str("{}").unwrap();
        assert_eq!(p, Prediction::default());
        assert_eq!(p.action, TradeAction::None);
        assert_eq!(p.market_sentiment, "Neutral");
        assert_eq!(p.predicted_price, None);
        assert_eq!(p.confidence_level(), ConfidenceLevel::Low);
    }

    #[test]
    fn nulls_take_defaults() {
        let json = r#"{"action": null, "timing": null, "confidence": null,
            "marketSentiment": null, "modelAccuracy": null, "predictedPrice": null}"#;
        let p: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(p.action, TradeAction::None);
        assert_eq!(p.timing, "");
        assert_eq!(p.confidence, 0.0);
        assert_eq!(p.market_sentiment, "Neutral");
        assert_eq!(p.model_accuracy.train, 0.0);
    }

    #[test]
    fn blank_sentiment_is_neutral() {
        let p: Prediction = serde_json::from_str(r#"{"marketSentiment": "  "}"#).unwrap();
        assert_eq!(p.market_sentiment, "Neutral");
    }

    #[test]
    fn action_parsing() {
        assert_eq!(TradeAction::parse("BUY"), TradeAction::Buy);
        assert_eq!(TradeAction::parse("buy"), TradeAction::Buy);
        assert_eq!(TradeAction::parse(" Sell "), TradeAction::Sell);
        assert_eq!(TradeAction::parse(""), TradeAction::None);
        assert_eq!(TradeAction::parse("HOLD"), TradeAction::None);
    }

    #[test]
    fn action_serializes_as_wire_text() {
        assert_eq!(serde_json::to_string(&TradeAction::Buy).unwrap(), r#""BUY""#);
        assert_eq!(serde_json::to_string(&TradeAction::None).unwrap(), r#""""#);
        assert_eq!(TradeAction::Sell.to_string(), "SELL");
    }

    #[test]
    fn confidence_thresholds() {
        assert_eq!(ConfidenceLevel::from_score(100.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(80.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(79.9), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(60.0), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(59.9), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.0), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::High.to_string(), "High");
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = PredictionResult {
            stock_symbol: "INFY".into(),
            exchange: "NSE".into(),
            prediction: Prediction::default(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["stockSymbol"], "INFY");
        assert_eq!(json["prediction"]["marketSentiment"], "Neutral");
    }
}

// ═══════════════════════════════════════════════════════════════════
// History & News
// ═══════════════════════════════════════════════════════════════════

mod history_and_news {
    use super::*;

    #[test]
    fn indicators_wire_names() {
        let json = r#"{
            "sma20": [{"value": 101.5}],
            "bollingerBands": [{"BB_upper": 110.0, "BB_middle": 100.0, "BB_lower": 90.0}]
        }"#;
        let ind: TechnicalIndicators = serde_json::from_str(json).unwrap();
        assert_eq!(ind.sma20[0].value, 101.5);
        assert_eq!(ind.bollinger_bands[0].upper, 110.0);
        assert_eq!(ind.bollinger_bands[0].lower, 90.0);
    }

    #[test]
    fn latest_close() {
        let history = StockHistory {
            symbol: "TCS".into(),
            exchange: "NSE".into(),
            historical_data: vec![],
            technical_indicators: TechnicalIndicators::default(),
        };
        assert_eq!(history.latest_close(), None);
    }

    #[test]
    fn sentiment_thresholds() {
        assert_eq!(SentimentLabel::from_score(0.75), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.61), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.6), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.5), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.4), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.39), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Negative);
    }

    #[test]
    fn news_item_label_and_display() {
        let item = NewsItem::new("Up", "Good", 0.9);
        assert_eq!(item.label(), SentimentLabel::Positive);
        assert_eq!(item.label().to_string(), "Positive");
    }

    #[test]
    fn news_item_without_description() {
        let item: NewsItem = serde_json::from_str(r#"{"title": "T", "sentiment": 0.3}"#).unwrap();
        assert_eq!(item.description, "");
        assert_eq!(item.label(), SentimentLabel::Negative);
    }
}
