//! Built-in Mumbai neighborhood rates (currency per sq ft).
//!
//! Order is the order the selection step lists them in; `Other` stays last.

use crate::domain::Tier;

/// `(name, min_rate, max_rate, avg_rate, tier)`
pub(super) const MUMBAI: &[(&str, f64, f64, f64, Tier)] = &[
    // Island city and western seafront
    ("Bandra West", 25000.0, 60000.0, 40000.0, Tier::UltraPremium),
    ("Juhu", 30000.0, 70000.0, 50000.0, Tier::UltraPremium),
    ("Worli", 35000.0, 80000.0, 55000.0, Tier::UltraPremium),
    ("Lower Parel", 30000.0, 65000.0, 45000.0, Tier::UltraPremium),
    ("Marine Drive", 40000.0, 90000.0, 65000.0, Tier::UltraPremium),
    ("Nariman Point", 45000.0, 100000.0, 70000.0, Tier::UltraPremium),
    ("Colaba", 35000.0, 75000.0, 55000.0, Tier::UltraPremium),
    ("Churchgate", 30000.0, 70000.0, 50000.0, Tier::UltraPremium),
    ("Fort", 25000.0, 60000.0, 40000.0, Tier::UltraPremium),
    // Western suburbs
    ("Andheri West", 15000.0, 45000.0, 30000.0, Tier::Premium),
    ("Vile Parle West", 20000.0, 50000.0, 35000.0, Tier::Premium),
    ("Dadar West", 18000.0, 40000.0, 28000.0, Tier::Premium),
    ("Andheri East", 12000.0, 35000.0, 22000.0, Tier::Premium),
    ("Santacruz West", 20000.0, 50000.0, 35000.0, Tier::Premium),
    ("Santacruz East", 15000.0, 40000.0, 25000.0, Tier::Premium),
    ("Goregaon West", 12000.0, 35000.0, 22000.0, Tier::Premium),
    ("Goregaon East", 10000.0, 30000.0, 18000.0, Tier::Premium),
    ("Jogeshwari West", 12000.0, 35000.0, 22000.0, Tier::Premium),
    ("Jogeshwari East", 10000.0, 30000.0, 18000.0, Tier::Premium),
    // Northern suburbs
    ("Malad West", 12000.0, 30000.0, 20000.0, Tier::MidRange),
    ("Malad East", 10000.0, 25000.0, 16000.0, Tier::MidRange),
    ("Kandivali West", 10000.0, 25000.0, 17000.0, Tier::MidRange),
    ("Kandivali East", 8000.0, 22000.0, 14000.0, Tier::MidRange),
    ("Borivali West", 9000.0, 22000.0, 15000.0, Tier::MidRange),
    ("Borivali East", 7000.0, 20000.0, 12000.0, Tier::MidRange),
    ("Dahisar West", 8000.0, 20000.0, 13000.0, Tier::MidRange),
    ("Dahisar East", 6000.0, 18000.0, 11000.0, Tier::MidRange),
    ("Mira Road East", 7000.0, 18000.0, 12000.0, Tier::MidRange),
    ("Mira Road West", 6000.0, 16000.0, 10000.0, Tier::MidRange),
    ("Bhayandar West", 6000.0, 15000.0, 9000.0, Tier::MidRange),
    ("Bhayandar East", 5000.0, 13000.0, 8000.0, Tier::MidRange),
    ("Naigaon East", 7000.0, 18000.0, 12000.0, Tier::MidRange),
    ("Naigaon West", 6000.0, 16000.0, 10000.0, Tier::MidRange),
    ("Vasai West", 6000.0, 15000.0, 9000.0, Tier::MidRange),
    ("Vasai East", 5000.0, 13000.0, 8000.0, Tier::MidRange),
    // Thane
    ("Thane West", 8000.0, 20000.0, 14000.0, Tier::MidRange),
    ("Thane East", 6000.0, 18000.0, 11000.0, Tier::MidRange),
    ("Majiwada", 7000.0, 18000.0, 12000.0, Tier::MidRange),
    ("Kolshet Road", 8000.0, 20000.0, 14000.0, Tier::MidRange),
    ("Manpada", 7000.0, 18000.0, 12000.0, Tier::MidRange),
    ("Prabhadevi", 20000.0, 50000.0, 35000.0, Tier::Premium),
    // Kalyan–Dombivli belt
    ("Kalyan West", 5000.0, 12000.0, 8000.0, Tier::Affordable),
    ("Kalyan East", 4000.0, 10000.0, 7000.0, Tier::Affordable),
    ("Dombivli East", 6000.0, 15000.0, 10000.0, Tier::Affordable),
    ("Dombivli West", 5000.0, 13000.0, 9000.0, Tier::Affordable),
    ("Ambernath", 4000.0, 10000.0, 7000.0, Tier::Affordable),
    ("Badlapur", 3000.0, 8000.0, 5000.0, Tier::Affordable),
    ("Ulhasnagar", 3000.0, 8000.0, 5000.0, Tier::Affordable),
    // Navi Mumbai
    ("Vashi", 12000.0, 30000.0, 20000.0, Tier::MidRange),
    ("Nerul", 10000.0, 25000.0, 17000.0, Tier::MidRange),
    ("Seawoods", 11000.0, 28000.0, 19000.0, Tier::MidRange),
    ("Belapur", 9000.0, 22000.0, 15000.0, Tier::MidRange),
    ("Kharghar", 8000.0, 20000.0, 14000.0, Tier::MidRange),
    ("Panvel", 6000.0, 15000.0, 10000.0, Tier::Affordable),
    ("Taloja", 5000.0, 12000.0, 8000.0, Tier::Affordable),
    // Central Mumbai
    ("Parel", 25000.0, 60000.0, 40000.0, Tier::UltraPremium),
    ("Sewri", 15000.0, 40000.0, 25000.0, Tier::Premium),
    ("Wadala", 12000.0, 35000.0, 22000.0, Tier::Premium),
    ("Sion", 15000.0, 40000.0, 25000.0, Tier::Premium),
    ("Matunga", 18000.0, 45000.0, 30000.0, Tier::Premium),
    ("Mahim", 20000.0, 50000.0, 35000.0, Tier::Premium),
    ("Bandra East", 15000.0, 40000.0, 25000.0, Tier::Premium),
    ("Khar West", 20000.0, 50000.0, 35000.0, Tier::Premium),
    ("Khar East", 12000.0, 35000.0, 22000.0, Tier::Premium),
    // Eastern suburbs
    ("Chembur", 12000.0, 35000.0, 22000.0, Tier::Premium),
    ("Ghatkopar West", 10000.0, 30000.0, 18000.0, Tier::MidRange),
    ("Ghatkopar East", 8000.0, 25000.0, 15000.0, Tier::MidRange),
    ("Kurla West", 8000.0, 25000.0, 15000.0, Tier::MidRange),
    ("Kurla East", 6000.0, 20000.0, 12000.0, Tier::MidRange),
    ("Mankhurd", 5000.0, 15000.0, 9000.0, Tier::Affordable),
    ("Govandi", 5000.0, 15000.0, 9000.0, Tier::Affordable),
    ("Trombay", 6000.0, 18000.0, 11000.0, Tier::MidRange),
    ("Mulund West", 10000.0, 30000.0, 18000.0, Tier::MidRange),
    ("Mulund East", 8000.0, 25000.0, 15000.0, Tier::MidRange),
    ("Bhandup West", 8000.0, 25000.0, 15000.0, Tier::MidRange),
    ("Bhandup East", 6000.0, 20000.0, 12000.0, Tier::MidRange),
    ("Powai", 15000.0, 40000.0, 25000.0, Tier::Premium),
    ("Vikhroli West", 10000.0, 30000.0, 18000.0, Tier::MidRange),
    ("Vikhroli East", 8000.0, 25000.0, 15000.0, Tier::MidRange),
    ("Kanjurmarg West", 7000.0, 20000.0, 13000.0, Tier::MidRange),
    ("Kanjurmarg East", 6000.0, 18000.0, 11000.0, Tier::MidRange),
    // Fallback for anything not listed above
    ("Other", 8000.0, 25000.0, 15000.0, Tier::MidRange),
];
