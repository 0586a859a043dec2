//! Writes a deterministic sample dataset to `datas/sales.csv` so the
//! dashboard can run without the original Kaggle download.

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn money(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (state, market region, area codes)
    let states: [(&str, &str, &[i64]); 12] = [
        ("California", "West", &[209, 415, 619]),
        ("Colorado", "West", &[303, 719, 970]),
        ("Connecticut", "East", &[203]),
        ("Florida", "South", &[305, 813]),
        ("Illinois", "Central", &[217, 312]),
        ("Iowa", "Central", &[319, 515]),
        ("Massachusetts", "East", &[413, 617]),
        ("New York", "East", &[212, 716]),
        ("Ohio", "Central", &[216, 614]),
        ("Oregon", "West", &[503]),
        ("Texas", "South", &[214, 512, 915]),
        ("Louisiana", "South", &[504]),
    ];

    // (product type, product, base monthly sales)
    let products: [(&str, &str, f64); 8] = [
        ("Coffee", "Amaretto", 220.0),
        ("Coffee", "Columbian", 280.0),
        ("Coffee", "Decaf Irish Cream", 190.0),
        ("Espresso", "Caffe Latte", 240.0),
        ("Espresso", "Decaf Espresso", 200.0),
        ("Herbal Tea", "Chamomile", 170.0),
        ("Herbal Tea", "Mint", 150.0),
        ("Tea", "Darjeeling", 180.0),
    ];

    let months: Vec<String> = (0..24)
        .map(|m| format!("{}-{:02}-01", 2010 + m / 12, m % 12 + 1))
        .collect();

    std::fs::create_dir_all("datas").expect("Failed to create datas/");
    let mut writer = csv::Writer::from_path("datas/sales.csv").expect("Failed to create output file");
    writer
        .write_record([
            "Area_Code",
            "State",
            "Market",
            "Market_Size",
            "Profit",
            "Margin",
            "Sales",
            "COGS",
            "Total_Expenses",
            "Marketing",
            "Inventory",
            "Budget_Profit",
            "Budget_COGS",
            "Budget_Margin",
            "Budget_Sales",
            "ProductID",
            "Date",
            "Product_Type",
            "Product",
            "Type",
        ])
        .expect("Failed to write header");

    let mut row_count: usize = 0;
    for (state, market, area_codes) in states {
        for &area_code in area_codes {
            let market_size = if rng.next_f64() < 0.55 {
                "Small Market"
            } else {
                "Major Market"
            };
            let size_factor = if market_size == "Major Market" { 1.6 } else { 1.0 };

            for (product_id, (product_type, product, base_sales)) in products.iter().enumerate() {
                for date in &months {
                    let sales = money(rng.gauss(base_sales * size_factor, 40.0).max(20.0));
                    let cogs = money((sales * rng.gauss(0.42, 0.04)).clamp(5.0, sales - 5.0));
                    let margin = money(sales - cogs);
                    let marketing = money((sales * rng.gauss(0.12, 0.02)).max(2.0));
                    let total_expenses = money((marketing + sales * rng.gauss(0.10, 0.02)).max(4.0));
                    let profit = money(margin - total_expenses);
                    let inventory = money(rng.gauss(650.0 * size_factor, 120.0).max(50.0));

                    // Budgets: last year's plan, a noisy version of actuals.
                    let budget_sales = money((sales * rng.gauss(1.0, 0.08) / 10.0).round() * 10.0);
                    let budget_cogs = money((cogs * rng.gauss(1.0, 0.08) / 10.0).round() * 10.0);
                    let budget_margin = money(budget_sales - budget_cogs);
                    let budget_profit =
                        money((profit * rng.gauss(1.0, 0.10) / 10.0).round() * 10.0);

                    let flavor = if product.contains("Decaf") { "Decaf" } else { "Regular" };

                    writer
                        .write_record([
                            area_code.to_string(),
                            state.to_string(),
                            market.to_string(),
                            market_size.to_string(),
                            format!("{profit:.2}"),
                            format!("{margin:.2}"),
                            format!("{sales:.2}"),
                            format!("{cogs:.2}"),
                            format!("{total_expenses:.2}"),
                            format!("{marketing:.2}"),
                            format!("{inventory:.2}"),
                            format!("{budget_profit:.2}"),
                            format!("{budget_cogs:.2}"),
                            format!("{budget_margin:.2}"),
                            format!("{budget_sales:.2}"),
                            (product_id + 1).to_string(),
                            date.clone(),
                            product_type.to_string(),
                            product.to_string(),
                            flavor.to_string(),
                        ])
                        .expect("Failed to write record");
                    row_count += 1;
                }
            }
        }
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {row_count} sales records to datas/sales.csv");
}
