// Askama template definitions

use askama::Template;

use crate::api::session::Flash;
use crate::booking::{price_table, seating_chart, COLUMNS};
use crate::db::Reservation;

// One seat on the reservation grid
pub struct SeatCell {
    pub row: i64,
    pub column: i64,
    pub price: i64,
    pub taken: bool,
}

pub struct SeatRow {
    pub number: i64,
    pub seats: Vec<SeatCell>,
}

/// Reservation grid with prices and taken flags
pub fn seat_grid(taken: &[(i64, i64)]) -> Vec<SeatRow> {
    price_table()
        .iter()
        .zip(1i64..)
        .map(|(prices, row)| SeatRow {
            number: row,
            seats: prices
                .iter()
                .zip(1i64..)
                .map(|(&price, column)| SeatCell {
                    row,
                    column,
                    price,
                    taken: taken.contains(&(row, column)),
                })
                .collect(),
        })
        .collect()
}

// Dashboard seating chart row
pub struct ChartRow {
    pub number: i64,
    pub cells: Vec<String>,
}

pub fn chart_rows(reservations: &[Reservation]) -> Vec<ChartRow> {
    seating_chart(reservations)
        .into_iter()
        .zip(1i64..)
        .map(|(cells, number)| ChartRow { number, cells })
        .collect()
}

// Landing page
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub version: String,
}

// Seat selection page
#[derive(Template)]
#[template(path = "reserve.html")]
pub struct ReserveTemplate {
    pub flash: Option<Flash>,
    pub rows: Vec<SeatRow>,
    pub columns: Vec<i64>,
}

impl ReserveTemplate {
    pub fn new(flash: Option<Flash>, taken: &[(i64, i64)]) -> Self {
        Self {
            flash,
            rows: seat_grid(taken),
            columns: (1..=COLUMNS).collect(),
        }
    }
}

// Login template
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub flash: Option<Flash>,
    pub version: String,
}

// Admin dashboard
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub flash: Option<Flash>,
    pub reservations: Vec<Reservation>,
    pub total_sales: i64,
    pub chart: Vec<ChartRow>,
    pub columns: Vec<i64>,
}

impl DashboardTemplate {
    pub fn new(flash: Option<Flash>, reservations: Vec<Reservation>, total_sales: i64) -> Self {
        Self {
            flash,
            chart: chart_rows(&reservations),
            reservations,
            total_sales,
            columns: (1..=COLUMNS).collect(),
        }
    }
}
