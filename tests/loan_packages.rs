use homeful_mortgage::chrono::{TimeZone, Utc};
use homeful_mortgage::*;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// fixtures
// ===========================================================================

fn clock() -> SafeTimeProvider {
    SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap(),
    ))
}

fn standard_params(years: u32) -> MortgageParams {
    MortgageParams::new()
        .with_percent_down_payment(dec!(0.05))
        .with_down_payment_term(12)
        .with_percent_miscellaneous_fees(dec!(0.085))
        .with_interest_rate(dec!(0.07))
        .with_balance_payment_term(years)
}

fn package(tcp: i64, years: u32) -> Mortgage {
    Mortgage::with_context(
        Property::new(Money::from_major(tcp)),
        Borrower::new(Money::from_major(50_000)),
        standard_params(years),
        MortgageConfig::default(),
        &clock(),
    )
    .unwrap()
}

fn money(value: Decimal) -> Money {
    Money::of(value).unwrap()
}

// ===========================================================================
// 2.5M package
// ===========================================================================

#[test]
fn test_two_and_a_half_million_package() {
    let expected = [
        (20, 19_978, dec!(66593.34), 1_934_738, 642_137),
        (25, 18_213, dec!(60710), 2_122_304, 454_571),
        (30, 17_144, dec!(57146.67), 2_254_614, 322_261),
    ];

    for (years, amortization, requirement, present_value, difference) in expected {
        let data = package(2_500_000, years).to_data().unwrap();

        assert_eq!(data.miscellaneous_fees, Money::from_major(212_500));
        assert_eq!(data.down_payment, Money::from_major(125_000));
        assert_eq!(data.partial_miscellaneous_fees, Money::from_major(10_625));
        assert_eq!(data.dp_amortization, money(dec!(10416.67)));
        assert_eq!(data.cash_out, Money::from_major(135_625));
        assert_eq!(data.loan_amount, Money::from_major(2_576_875));
        assert_eq!(data.bp_term, years);
        assert_eq!(data.loan_amortization, Money::from_major(amortization));
        assert_eq!(data.income_requirement, money(requirement));
        assert_eq!(data.joint_disposable_monthly_income, Money::from_major(15_000));
        assert_eq!(
            data.present_value_from_monthly_disposable_income,
            Money::from_major(present_value)
        );
        assert_eq!(data.loan_difference, Money::from_major(difference));
    }
}

// ===========================================================================
// 4.5M package
// ===========================================================================

#[test]
fn test_four_and_a_half_million_package() {
    let expected = [
        (20, 35_961, dec!(119870), 2_703_637),
        (25, 32_783, dec!(109276.67), 2_516_071),
        (30, 30_859, dec!(102863.34), 2_383_761),
    ];

    for (years, amortization, requirement, difference) in expected {
        let data = package(4_500_000, years).to_data().unwrap();

        assert_eq!(data.miscellaneous_fees, Money::from_major(382_500));
        assert_eq!(data.down_payment, Money::from_major(225_000));
        assert_eq!(data.partial_miscellaneous_fees, Money::from_major(19_125));
        assert_eq!(data.dp_amortization, Money::from_major(18_750));
        assert_eq!(data.cash_out, Money::from_major(244_125));
        assert_eq!(data.loan_amount, Money::from_major(4_638_375));
        assert_eq!(data.loan_amortization, Money::from_major(amortization));
        assert_eq!(data.income_requirement, money(requirement));
        assert_eq!(data.loan_difference, Money::from_major(difference));
    }
}

#[test]
fn test_contract_price_change_rescales_package() {
    let mut mortgage = package(2_500_000, 20);
    mortgage
        .set_contract_price(Money::from_major(4_500_000))
        .unwrap();

    assert_eq!(mortgage.get_percent_down_payment(), Rate::from_percentage(5));
    assert_eq!(
        mortgage.get_percent_miscellaneous_fees(),
        Rate::from_decimal(dec!(0.085))
    );
    assert_eq!(mortgage.get_down_payment().principal, Money::from_major(225_000));
    assert_eq!(mortgage.get_miscellaneous_fees(), Money::from_major(382_500));

    let loan = mortgage.get_loan().unwrap();
    assert_eq!(loan.principal, Money::from_major(4_638_375));
    assert_eq!(loan.monthly_amortization().unwrap(), Money::from_major(35_961));
    assert_eq!(mortgage.get_total_cash_out(None), Money::from_major(244_125));
}

// ===========================================================================
// typical borrower
// ===========================================================================

#[test]
fn test_typical_borrower_on_four_and_a_half_million() {
    let mut mortgage = Mortgage::create_with_typical_borrower(
        Property::new(Money::from_major(4_500_000)),
        standard_params(20),
        None,
        MortgageConfig::default(),
        &clock(),
    )
    .unwrap();

    assert_eq!(mortgage.borrower().gross_monthly_income, Money::from_major(119_870));
    assert!(mortgage.borrower().birthdate.is_some());

    let loan = mortgage.get_loan().unwrap();
    assert_eq!(loan.principal, Money::from_major(4_638_375));
    assert_eq!(loan.monthly_amortization().unwrap(), Money::from_major(35_961));
    assert_eq!(loan.income_requirement().unwrap(), Money::from_major(119_870));

    let longer = loan.with_term(Term::years(25));
    assert_eq!(longer.monthly_amortization().unwrap(), Money::from_major(32_783));
    assert_eq!(longer.income_requirement().unwrap(), money(dec!(109276.67)));

    mortgage
        .borrower_mut()
        .set_gross_monthly_income(Money::from_major(110_000));
    assert_eq!(
        mortgage.get_joint_borrower_disposable_monthly_income().unwrap(),
        Money::from_major(33_000)
    );
    assert_eq!(
        mortgage
            .get_present_value_from_monthly_disposable_income_payments()
            .unwrap()
            .discounted_value()
            .unwrap(),
        Money::from_major(4_256_423)
    );
    assert_eq!(mortgage.get_loan_difference().unwrap(), Money::from_major(381_952));
}

#[test]
fn test_surplus_income_gives_negative_difference() {
    let mut mortgage = package(2_500_000, 20);
    mortgage
        .borrower_mut()
        .set_gross_monthly_income(Money::from_major(150_000));

    let data = mortgage.to_data().unwrap();
    assert_eq!(
        data.present_value_from_monthly_disposable_income,
        Money::from_major(5_804_213)
    );
    assert_eq!(data.loan_difference, Money::from_major(-3_227_338));
}

// ===========================================================================
// back-computation
// ===========================================================================

#[test]
fn test_amounts_back_compute_percents() {
    let mut mortgage = package(2_500_000, 20);

    mortgage
        .set_down_payment(Money::from_major(250_000), None)
        .unwrap();
    assert_eq!(mortgage.get_percent_down_payment(), Rate::from_percentage(10));
    assert_eq!(mortgage.get_down_payment_term(), 12);

    mortgage
        .set_miscellaneous_fees(Money::from_major(250_000))
        .unwrap();
    assert_eq!(
        mortgage.get_percent_miscellaneous_fees(),
        Rate::from_percentage(10)
    );

    // partial fees follow the new down payment percent
    assert_eq!(
        mortgage.get_partial_miscellaneous_fees().unwrap(),
        Money::from_major(25_000)
    );
    assert_eq!(
        mortgage.cash_outs().find(Input::PARTIAL_MISCELLANEOUS_FEES).map(|c| c.amount),
        Some(Money::from_major(25_000))
    );
}

// ===========================================================================
// invariants
// ===========================================================================

#[test]
fn test_figures_add_up() {
    let mortgage = Mortgage::with_context(
        Property::new(money(dec!(3_187_450.50))),
        Borrower::new(Money::from_major(62_000)),
        MortgageParams::new()
            .with_percent_down_payment(dec!(0.0725))
            .with_down_payment_term(18)
            .with_percent_miscellaneous_fees(dec!(0.0615))
            .with_interest_rate(dec!(0.0625))
            .with_balance_payment_term(25)
            .with_consulting_fee(dec!(12500))
            .with_waived_processing_fee(dec!(5000)),
        MortgageConfig::default(),
        &clock(),
    )
    .unwrap();

    let contract_price = mortgage.get_contract_price();
    let down_payment = mortgage.get_down_payment().principal;
    assert_eq!(down_payment + mortgage.get_balance_payment(), contract_price);

    let fees = mortgage.get_miscellaneous_fees();
    let partial = mortgage.get_partial_miscellaneous_fees().unwrap();
    let balance = mortgage.get_balance_miscellaneous_fees().unwrap();
    assert_eq!(partial + balance, fees);

    let loan = mortgage.get_loan().unwrap();
    assert_eq!(loan.principal, mortgage.get_balance_payment() + balance);

    let ledger_sum: Money = mortgage.cash_outs().iter().map(|c| c.amount).sum();
    assert_eq!(mortgage.get_total_cash_out(None), ledger_sum);
    assert_eq!(
        mortgage.cash_outs().net_total(),
        ledger_sum - Money::from_major(5_000) - Money::from_major(5_000)
    );
    assert_eq!(
        mortgage.get_total_cash_out(None),
        Money::from_major(12_500) + Money::from_major(5_000) + down_payment + partial
    );
}

#[test]
fn test_promotional_boundary() {
    let mut mortgage = Mortgage::with_context(
        Property::new(Money::from_major(2_500_000)),
        Borrower::new(Money::from_major(50_000)),
        standard_params(20)
            .with_low_cash_out(dec!(20000))
            .with_waived_processing_fee(dec!(20000)),
        MortgageConfig::default(),
        &clock(),
    )
    .unwrap();
    assert!(!mortgage.is_promotional());
    assert!(!mortgage.to_data().unwrap().promotional);

    mortgage.set_low_cash_out(Money::from_major(20_001)).unwrap();
    assert!(mortgage.is_promotional());
    assert_eq!(mortgage.get_balance_cash_out(), Money::from_major(1));
    // a promo waives the down payment, the whole price and fees go to the loan
    assert_eq!(mortgage.get_down_payment().principal, Money::ZERO);
    assert_eq!(mortgage.get_percent_down_payment(), Rate::from_percentage(5));
    assert_eq!(mortgage.get_partial_miscellaneous_fees().unwrap(), Money::ZERO);
    assert_eq!(mortgage.get_loan().unwrap().principal, Money::from_major(2_712_500));
    assert_eq!(
        mortgage.cash_outs().find(Input::DOWN_PAYMENT).map(|item| item.amount),
        Some(Money::ZERO)
    );

    mortgage.set_low_cash_out(Money::from_major(20_000)).unwrap();
    assert!(!mortgage.is_promotional());
    assert_eq!(mortgage.get_down_payment().principal, Money::from_major(125_000));
    assert_eq!(mortgage.get_partial_miscellaneous_fees().unwrap(), Money::from_major(10_625));
    assert_eq!(mortgage.get_loan().unwrap().principal, Money::from_major(2_576_875));
}

// ===========================================================================
// inputs
// ===========================================================================

#[test]
fn test_validation_reports_every_field() {
    let params = MortgageParams::new()
        .with_percent_down_payment(dec!(1.5))
        .with_balance_payment_term(31)
        .with_interest_rate(dec!(-0.01))
        .with_consulting_fee(dec!(40000))
        .with_down_payment_term(25)
        .with_low_cash_out(dec!(100001));

    let result = Mortgage::with_context(
        Property::new(Money::from_major(2_500_000)),
        Borrower::new(Money::from_major(50_000)),
        params,
        MortgageConfig::default(),
        &clock(),
    );

    match result {
        Err(MortgageError::Validation(errors)) => assert_eq!(
            errors.fields(),
            vec![
                Input::PERCENT_DP,
                Input::BP_TERM,
                Input::BP_INTEREST_RATE,
                Input::CONSULTING_FEE,
                Input::DP_TERM,
                Input::LOW_CASH_OUT,
            ]
        ),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_params_from_json() {
    let params = MortgageParams::from_json(
        r#"{
            "percent_down_payment": "0.05",
            "down_payment_term": "12",
            "balance_payment_term": "20",
            "balance_payment_interest_rate": "0.07",
            "percent_miscellaneous_fees": "0.085"
        }"#,
    )
    .unwrap();

    let mortgage = Mortgage::with_context(
        Property::new(Money::from_major(2_500_000)),
        Borrower::new(Money::from_major(50_000)),
        params,
        MortgageConfig::default(),
        &clock(),
    )
    .unwrap();
    assert_eq!(mortgage.get_loan_difference().unwrap(), Money::from_major(642_137));
}

#[test]
fn test_repeated_update_is_stable() {
    let params = standard_params(25)
        .with_consulting_fee(dec!(10000))
        .with_processing_fee(dec!(11000));
    let mut mortgage = package(2_500_000, 20);

    mortgage.update(&params).unwrap();
    let first: Vec<&'static str> = mortgage.take_events().iter().map(MortgageEvent::name).collect();
    let len = mortgage.cash_outs().len();
    let total = mortgage.get_total_cash_out(None);

    mortgage.update(&params).unwrap();
    let second: Vec<&'static str> = mortgage.take_events().iter().map(MortgageEvent::name).collect();

    assert_eq!(first, second);
    assert_eq!(mortgage.cash_outs().len(), len);
    assert_eq!(len, 4);
    assert_eq!(mortgage.get_total_cash_out(None), total);
    assert_eq!(
        total,
        Money::from_major(10_000 + 11_000 + 125_000 + 10_625)
    );
    assert_eq!(mortgage.get_balance_payment_term(), 25);
}

#[test]
fn test_update_without_fees_drops_them() {
    let mut mortgage = Mortgage::with_context(
        Property::new(Money::from_major(2_500_000)),
        Borrower::new(Money::from_major(50_000)),
        standard_params(20).with_consulting_fee(dec!(10000)),
        MortgageConfig::default(),
        &clock(),
    )
    .unwrap();
    assert_eq!(mortgage.cash_outs().len(), 3);

    mortgage.update(&standard_params(20)).unwrap();
    assert_eq!(mortgage.cash_outs().len(), 2);
    assert_eq!(mortgage.get_consulting_fee(), Money::ZERO);
}
