use std::io;
use std::path::Path;

use crate::error::Result;
use crate::models::DayPlan;

const HEADER: [&str; 11] = [
    "day", "meal", "index", "name", "quantity", "unit", "calories", "protein", "fat", "carbs",
    "dominant_macro",
];

/// Write one row per item of every plan.
pub fn write_csv<W: io::Write>(writer: W, plans: &[DayPlan]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for plan in plans {
        for meal in &plan.meals {
            for (i, item) in meal.items.iter().enumerate() {
                let quantity = if item.kind.is_measured() {
                    format!("{:.0}", item.quantity)
                } else {
                    item.quantity_token.clone()
                };
                wtr.write_record([
                    plan.day_number.to_string(),
                    meal.name.to_string(),
                    (i + 1).to_string(),
                    item.name.clone(),
                    quantity,
                    item.unit.clone(),
                    format!("{:.0}", item.calories),
                    format!("{:.1}", item.protein),
                    format!("{:.1}", item.fat),
                    format!("{:.1}", item.carbs),
                    item.dominant_macro().as_str().to_string(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write plans to a CSV file at `path`.
pub fn write_csv_file(path: &Path, plans: &[DayPlan]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(file, plans)?;
    tracing::info!(path = %path.display(), days = plans.len(), "wrote CSV export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, Meal, MealName};

    #[test]
    fn test_rows_per_item() {
        let mut plan = DayPlan::new(2);
        let mut snack = Meal::new(MealName::Snack, 200);
        snack.items.push(Item::new(
            "Almonds, raw",
            20.0,
            "g",
            "20",
            120.0,
            Some((4.0, 10.0, 3.0)),
        ));
        snack
            .items
            .push(Item::new("Apple", 1.0, "medium", "1", 95.0, Some((0.5, 0.3, 25.0))));
        plan.meals.push(snack);

        let mut buf = Vec::new();
        write_csv(&mut buf, &[plan]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("day,meal,index"));
        assert_eq!(lines[1], "2,Snack,1,\"Almonds, raw\",20,g,120,4.0,10.0,3.0,fat");
        assert_eq!(lines[2], "2,Snack,2,Apple,1,medium,95,0.5,0.3,25.0,carbs");
    }
}
