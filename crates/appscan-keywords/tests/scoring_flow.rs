use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use appscan_core::traits::ReviewSource;
use appscan_core::types::{AppListing, LexiconSpec, Review, Rounding, TermSpec};
use appscan_keywords::{classify, tally, Lexicon, TargetingClassifier, Thresholds, Tier};
use proptest::prelude::*;

fn reference() -> Lexicon {
    Lexicon::try_from(LexiconSpec::default()).expect("reference lexicon")
}

fn listing(id: &str, title: &str, description: &str) -> AppListing {
    AppListing { id: id.to_string(), title: Some(title.to_string()), description: Some(description.to_string()) }
}

fn review(text: &str) -> Review {
    Review { title: None, text: Some(text.to_string()) }
}

struct CountingSource {
    reviews: Vec<Review>,
    calls: AtomicUsize,
}

impl ReviewSource for CountingSource {
    fn fetch_reviews(&self, _app_id: &str) -> anyhow::Result<Vec<Review>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reviews.clone())
    }
}

struct FailingSource;

impl ReviewSource for FailingSource {
    fn fetch_reviews(&self, app_id: &str) -> anyhow::Result<Vec<Review>> {
        anyhow::bail!("store returned 503 for {app_id}")
    }
}

#[test]
fn whole_word_tally_fixture() {
    let lexicon = Lexicon::new(vec![
        TermSpec::new("child", 1.0, &["children"]),
        TermSpec::new("kid", 1.0, &["kids"]),
        TermSpec::new("toddler", 1.0, &["toddlers"]),
    ])
    .expect("lexicon");
    let t = tally(["This app is for kids and toddlers"], &lexicon);
    assert_eq!(t.get("kid"), 1);
    assert_eq!(t.get("toddler"), 1);
    assert_eq!(t.get("child"), 0);

    let t = tally(["No kidding, skidding is not for kids"], &lexicon);
    assert_eq!(t.get("kid"), 1, "substrings of larger words never count");
}

#[test]
fn tally_adds_across_fields() {
    let lexicon = reference();
    let t = tally(["Kids Paint", "A paint app for kids, children and your baby"], &lexicon);
    assert_eq!(t.get("kid"), 2);
    assert_eq!(t.get("child"), 1);
    assert_eq!(t.get("toddler"), 1);
    assert_eq!(t.total(), 4);
}

#[test]
fn listing_tier_decides_without_fetching_reviews() {
    let lexicon = reference();
    let classifier = TargetingClassifier::new(&lexicon, Thresholds::default());
    let source = CountingSource { reviews: vec![], calls: AtomicUsize::new(0) };
    let app = listing("1", "Kids Math", "Math games for kids. Your kid and your son will love it.");

    let verdict = classifier.classify_listing(&app, &source);
    assert!(verdict.targeted);
    assert_eq!(verdict.decided_by, Some(Tier::Listing));
    assert_eq!(verdict.significant, vec!["kid".to_string()]);
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    assert!(verdict.reviews.is_none());
}

#[test]
fn reviews_tier_uses_higher_threshold() {
    let lexicon = reference();
    let classifier = TargetingClassifier::new(&lexicon, Thresholds::default());
    let app = listing("2", "Puzzle Time", "Relaxing puzzles for everyone");

    let five = CountingSource {
        reviews: (0..5).map(|_| review("my daughter loves it")).collect(),
        calls: AtomicUsize::new(0),
    };
    let verdict = classifier.classify_listing(&app, &five);
    assert!(!verdict.targeted, "5 mentions stay under a review threshold of 6");
    assert_eq!(five.calls.load(Ordering::SeqCst), 1);
    assert_eq!(verdict.reviews.as_ref().map(|t| t.get("kid")), Some(5));

    let six = CountingSource {
        reviews: (0..6).map(|_| review("my daughter loves it")).collect(),
        calls: AtomicUsize::new(0),
    };
    let verdict = classifier.classify_listing(&app, &six);
    assert!(verdict.targeted);
    assert_eq!(verdict.decided_by, Some(Tier::Reviews));
}

#[test]
fn review_titles_and_texts_both_count() {
    let lexicon = reference();
    let classifier = TargetingClassifier::new(&lexicon, Thresholds::default());
    let app = listing("3", "Lullabies", "Soothing songs");
    // toddler threshold at base 6 with weight 0.75 is 5
    let source = CountingSource {
        reviews: vec![
            Review { title: Some("Great for my baby".into()), text: Some("Our infant sleeps".into()) },
            Review { title: Some("Toddlers love it".into()), text: Some("the tot dances, baby too".into()) },
        ],
        calls: AtomicUsize::new(0),
    };
    let verdict = classifier.classify_listing(&app, &source);
    assert!(verdict.targeted);
    assert_eq!(verdict.significant, vec!["toddler".to_string()]);
}

#[test]
fn unavailable_reviews_count_as_negative() {
    let lexicon = reference();
    let classifier = TargetingClassifier::new(&lexicon, Thresholds::default());
    let app = listing("4", "Weather", "Forecasts");
    let verdict = classifier.classify_listing(&app, &FailingSource);
    assert!(!verdict.targeted);
    assert_eq!(verdict.decided_by, None);
    assert!(verdict.reviews.is_none());

    let empty: HashMap<String, Vec<Review>> = HashMap::new();
    assert!(!classifier.classify_listing(&app, &empty).targeted);
}

#[test]
fn missing_listing_fields_are_not_errors() {
    let lexicon = reference();
    let classifier = TargetingClassifier::new(&lexicon, Thresholds::default());
    let app = AppListing { id: "5".into(), title: None, description: None };
    let verdict = classifier.classify_listing(&app, &FailingSource);
    assert_eq!(verdict.listing.total(), 0);
    assert!(!verdict.targeted);
}

#[test]
fn rounding_convention_changes_review_verdict() {
    let lexicon = reference();
    let app = listing("6", "Sleep Sounds", "White noise");
    let mut reviews: HashMap<String, Vec<Review>> = HashMap::new();
    reviews.insert("6".into(), (0..4).map(|_| review("helps the baby sleep")).collect());

    let half_up = TargetingClassifier::new(&lexicon, Thresholds::default());
    assert!(!half_up.classify_listing(&app, &reviews).targeted, "round(4.5) = 5 needs five mentions");

    let half_even = TargetingClassifier::new(
        &lexicon,
        Thresholds { rounding: Rounding::HalfToEven, ..Thresholds::default() },
    );
    assert!(half_even.classify_listing(&app, &reviews).targeted, "round_half_even(4.5) = 4");
}

#[test]
fn listing_threshold_applies_to_title_and_description() {
    let lexicon = reference();
    let t = tally(["Kids Art", "art for kids"], &lexicon);
    assert!(!classify(&t, &lexicon, 3));
    let t = tally(["Kids Art", "art for kids and your kid"], &lexicon);
    assert!(classify(&t, &lexicon, 3));
}

proptest! {
    #[test]
    fn tally_is_idempotent(texts in proptest::collection::vec("(kid|kids|baby|child|skid|[a-z]{1,6}| |, ){0,20}", 0..4)) {
        let lexicon = reference();
        let first = tally(&texts, &lexicon);
        let second = tally(&texts, &lexicon);
        prop_assert_eq!(first, second);
    }
}
