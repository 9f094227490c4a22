use std::collections::{HashMap, HashSet};

use orderdash_core::{Location, NormalizedOrder};
use serde::Serialize;

use super::{ensure_finite, ratio};
use crate::error::MetricsError;

const TOP_CITIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitySales {
    pub city: String,
    pub state: String,
    pub country: String,
    pub order_count: usize,
    pub total_revenue: f64,
    pub unique_customers: usize,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopCities {
    pub cities: Vec<CitySales>,
}

struct CityTally<'a> {
    location: Location,
    order_count: usize,
    revenue: f64,
    customers: HashSet<&'a str>,
}

/// Groups orders by resolved `(city, state, country)` and returns the ten
/// groups with the most orders. Unknown parts use the `Unknown *` labels and
/// still form a group.
///
/// # Errors
///
/// [`MetricsError::NonFiniteSum`] when a city's revenue overflows.
pub fn top_cities(orders: &[NormalizedOrder]) -> Result<TopCities, MetricsError> {
    let mut groups: Vec<CityTally<'_>> = Vec::new();
    let mut index: HashMap<Location, usize> = HashMap::new();

    for order in orders {
        let location = order.location();
        let slot = if let Some(&slot) = index.get(&location) {
            slot
        } else {
            index.insert(location.clone(), groups.len());
            groups.push(CityTally {
                location,
                order_count: 0,
                revenue: 0.0,
                customers: HashSet::new(),
            });
            groups.len() - 1
        };

        let group = &mut groups[slot];
        group.order_count += 1;
        group.revenue += order.local_currency_amount;
        if let Some(customer) = order.customer_id.as_deref() {
            group.customers.insert(customer);
        }
    }

    groups.sort_by(|a, b| b.order_count.cmp(&a.order_count));
    groups.truncate(TOP_CITIES);

    let cities = groups
        .into_iter()
        .map(|group| {
            let total_revenue = ensure_finite("top_cities", group.revenue)?;
            Ok(CitySales {
                city: group.location.city,
                state: group.location.state,
                country: group.location.country,
                order_count: group.order_count,
                total_revenue,
                unique_customers: group.customers.len(),
                avg_order_value: ratio(total_revenue, group.order_count),
            })
        })
        .collect::<Result<Vec<_>, MetricsError>>()?;

    Ok(TopCities { cities })
}
