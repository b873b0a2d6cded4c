/// loan calculator - price a house-and-lot package and compare it to the buyer's income
use homeful_mortgage::chrono::{TimeZone, Utc};
use homeful_mortgage::{
    Borrower, Money, Mortgage, MortgageConfig, MortgageParams, Property, SafeTimeProvider, Term,
    TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap(),
    ));

    // a 2.5M property, 5% down over a year, balance at 7%
    let params = MortgageParams::new()
        .with_percent_down_payment(dec!(0.05))
        .with_down_payment_term(12)
        .with_percent_miscellaneous_fees(dec!(0.085))
        .with_interest_rate(dec!(0.07))
        .with_balance_payment_term(20)
        .with_consulting_fee(dec!(10000));

    let borrower = Borrower::new(Money::from_major(50_000)).with_age(30, time.now().date_naive())?;
    let mut mortgage = Mortgage::with_context(
        Property::new(Money::from_major(2_500_000)),
        borrower,
        params,
        MortgageConfig::default(),
        &time,
    )?;

    println!("=== loan package ===\n");
    println!("{}", mortgage.to_data()?.to_json_pretty()?);

    println!("\n=== amortization by term ===\n");
    let loan = mortgage.get_loan()?;
    for years in [20, 25, 30] {
        let payment = loan.clone().with_term(Term::years(years));
        println!(
            "{} years: {} a month, income requirement {}",
            years,
            payment.monthly_amortization()?,
            payment.income_requirement()?
        );
    }

    println!("\n=== cash outs ===\n");
    for item in mortgage.cash_outs() {
        println!("{:<28} {:>12} {:?}", item.name, item.amount.to_string(), item.kind);
    }
    println!("total: {}", mortgage.get_total_cash_out(None));

    println!("\n=== price change ===\n");
    mortgage.set_contract_price(Money::from_major(4_500_000))?;
    println!("down payment: {}", mortgage.get_down_payment().principal);
    println!("loan: {}", mortgage.get_loan()?.principal);
    println!("loan difference: {}", mortgage.get_loan_difference()?);

    println!("\n=== signals ===\n");
    for event in mortgage.take_events() {
        println!("{}", event.name());
    }

    Ok(())
}
