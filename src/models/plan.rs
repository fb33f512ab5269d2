use std::fmt;

use serde::Serialize;

use crate::models::item::{Item, Nutrient};

/// The four meals of a day, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum MealName {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealName {
    pub const ALL: [MealName; 4] = [
        MealName::Breakfast,
        MealName::Lunch,
        MealName::Snack,
        MealName::Dinner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealName::Breakfast => "Breakfast",
            MealName::Lunch => "Lunch",
            MealName::Snack => "Snack",
            MealName::Dinner => "Dinner",
        }
    }

    /// Case-insensitive lookup of a meal name.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for MealName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One meal: the generator's stated total plus its items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    pub name: MealName,
    /// Total written in the meal header. May disagree with the items.
    pub stated_total: u32,
    pub items: Vec<Item>,
}

impl Meal {
    pub fn new(name: MealName, stated_total: u32) -> Self {
        Self {
            name,
            stated_total,
            items: Vec::new(),
        }
    }

    pub fn totals(&self) -> Totals {
        Totals::of(self.items.iter())
    }
}

/// Summed nutrients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
}

impl Totals {
    pub fn of<'a>(items: impl Iterator<Item = &'a Item>) -> Self {
        items.fold(Self::default(), |acc, item| Self {
            calories: acc.calories + item.calories,
            protein: acc.protein + item.protein,
            fat: acc.fat + item.fat,
            carbs: acc.carbs + item.carbs,
            fiber: acc.fiber + item.fiber,
        })
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbs => self.carbs,
        }
    }
}

/// A parsed day: number plus meals in Breakfast/Lunch/Snack/Dinner order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlan {
    pub day_number: u32,
    pub meals: Vec<Meal>,
}

impl DayPlan {
    pub fn new(day_number: u32) -> Self {
        Self {
            day_number,
            meals: Vec::new(),
        }
    }

    pub fn meal(&self, name: MealName) -> Option<&Meal> {
        self.meals.iter().find(|m| m.name == name)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.meals.iter().flat_map(|m| m.items.iter())
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.meals.iter_mut().flat_map(|m| m.items.iter_mut())
    }

    pub fn item_count(&self) -> usize {
        self.meals.iter().map(|m| m.items.len()).sum()
    }

    pub fn totals(&self) -> Totals {
        Totals::of(self.items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_name_parse() {
        assert_eq!(MealName::parse("breakfast"), Some(MealName::Breakfast));
        assert_eq!(MealName::parse(" DINNER "), Some(MealName::Dinner));
        assert_eq!(MealName::parse("brunch"), None);
    }

    #[test]
    fn test_day_totals() {
        let mut day = DayPlan::new(3);
        let mut lunch = Meal::new(MealName::Lunch, 600);
        lunch
            .items
            .push(Item::new("Rice", 150.0, "g", "150", 195.0, Some((4.0, 0.5, 42.0))));
        lunch
            .items
            .push(Item::new("Tofu", 100.0, "g", "100", 145.0, Some((15.0, 9.0, 3.0))));
        day.meals.push(lunch);

        let totals = day.totals();
        assert!((totals.calories - 340.0).abs() < 1e-9);
        assert!((totals.protein - 19.0).abs() < 1e-9);
        assert_eq!(day.item_count(), 2);
        assert!(day.meal(MealName::Lunch).is_some());
        assert!(day.meal(MealName::Dinner).is_none());
    }
}
