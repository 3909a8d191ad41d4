use serde::{Deserialize, Serialize};

use crate::model::Restaurant;


// Client-side listing filters. Empty strings mean "no filter"; set filters are ANDed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantFilter {
    // Case-insensitive substring of the city.
    pub city: String,
    // Exact company name.
    pub company: String,
}

impl RestaurantFilter {
    pub fn new(city: impl Into<String>, company: impl Into<String>) -> Self {
        RestaurantFilter { city: city.into(), company: company.into() }
    }

    pub fn is_empty(&self) -> bool { self.city.is_empty() && self.company.is_empty() }

    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.city_matches(restaurant) && self.company_matches(restaurant)
    }

    // A restaurant without a city never matches a non-empty city filter.
    fn city_matches(&self, restaurant: &Restaurant) -> bool {
        if self.city.is_empty() {
            return true;
        }
        let needle = self.city.to_lowercase();
        restaurant.city.as_ref().is_some_and(|city| city.to_lowercase().contains(&needle))
    }

    fn company_matches(&self, restaurant: &Restaurant) -> bool {
        self.company.is_empty() || restaurant.company == self.company
    }

    // Keeps the original order.
    pub fn apply(&self, restaurants: Vec<Restaurant>) -> Vec<Restaurant> {
        restaurants.into_iter().filter(|r| self.matches(r)).collect()
    }
}
