//! Built-in reference data: approved Indian cities and the foreign-location
//! lists used to reject postings outside India.

/// `(canonical name, state, state code)` for every approved city.
pub(crate) const BUILTIN_CITIES: &[(&str, &str, &str)] = &[
    ("Bengaluru", "Karnataka", "KA"),
    ("Mumbai", "Maharashtra", "MH"),
    ("Pune", "Maharashtra", "MH"),
    ("Delhi", "Delhi", "DL"),
    ("Hyderabad", "Telangana", "TS"),
    ("Chennai", "Tamil Nadu", "TN"),
    ("Kolkata", "West Bengal", "WB"),
    ("Ahmedabad", "Gujarat", "GJ"),
    ("Gurugram", "Haryana", "HR"),
    ("Noida", "Uttar Pradesh", "UP"),
    ("Greater Noida", "Uttar Pradesh", "UP"),
    ("Kochi", "Kerala", "KL"),
    ("Thiruvananthapuram", "Kerala", "KL"),
    ("Chandigarh", "Chandigarh", "CH"),
    ("Jaipur", "Rajasthan", "RJ"),
    ("Indore", "Madhya Pradesh", "MP"),
    ("Lucknow", "Uttar Pradesh", "UP"),
    ("Bhopal", "Madhya Pradesh", "MP"),
    ("Nagpur", "Maharashtra", "MH"),
    ("Visakhapatnam", "Andhra Pradesh", "AP"),
    ("Surat", "Gujarat", "GJ"),
    ("Coimbatore", "Tamil Nadu", "TN"),
    ("Vadodara", "Gujarat", "GJ"),
    ("Mysuru", "Karnataka", "KA"),
    ("Mangaluru", "Karnataka", "KA"),
    ("Patna", "Bihar", "BR"),
    ("Ranchi", "Jharkhand", "JH"),
    ("Bhubaneswar", "Odisha", "OD"),
    ("Guwahati", "Assam", "AS"),
    ("Dehradun", "Uttarakhand", "UK"),
    ("Nashik", "Maharashtra", "MH"),
    ("Rajkot", "Gujarat", "GJ"),
    ("Kanpur", "Uttar Pradesh", "UP"),
    ("Ludhiana", "Punjab", "PB"),
    ("Agra", "Uttar Pradesh", "UP"),
    ("Madurai", "Tamil Nadu", "TN"),
    ("Varanasi", "Uttar Pradesh", "UP"),
    ("Meerut", "Uttar Pradesh", "UP"),
    ("Faridabad", "Haryana", "HR"),
    ("Ghaziabad", "Uttar Pradesh", "UP"),
    ("Amritsar", "Punjab", "PB"),
    ("Prayagraj", "Uttar Pradesh", "UP"),
    ("Vijayawada", "Andhra Pradesh", "AP"),
    ("Jabalpur", "Madhya Pradesh", "MP"),
    ("Jodhpur", "Rajasthan", "RJ"),
    ("Raipur", "Chhattisgarh", "CG"),
    ("Kota", "Rajasthan", "RJ"),
    ("Gwalior", "Madhya Pradesh", "MP"),
    ("Aurangabad", "Maharashtra", "MH"),
    ("Tiruchirappalli", "Tamil Nadu", "TN"),
    ("Salem", "Tamil Nadu", "TN"),
    ("Udaipur", "Rajasthan", "RJ"),
    ("Jammu", "Jammu and Kashmir", "JK"),
    ("Srinagar", "Jammu and Kashmir", "JK"),
    ("Tirupati", "Andhra Pradesh", "AP"),
    ("Erode", "Tamil Nadu", "TN"),
    ("Bhilai", "Chhattisgarh", "CG"),
    ("Warangal", "Telangana", "TS"),
    ("Bhiwandi", "Maharashtra", "MH"),
    ("Guntur", "Andhra Pradesh", "AP"),
    ("Nellore", "Andhra Pradesh", "AP"),
    ("Belgaum", "Karnataka", "KA"),
    ("Durgapur", "West Bengal", "WB"),
    ("Kolhapur", "Maharashtra", "MH"),
    ("Ajmer", "Rajasthan", "RJ"),
    ("Bikaner", "Rajasthan", "RJ"),
    ("Jalandhar", "Punjab", "PB"),
    ("Siliguri", "West Bengal", "WB"),
    ("Thrissur", "Kerala", "KL"),
    ("Tirunelveli", "Tamil Nadu", "TN"),
    ("Saharanpur", "Uttar Pradesh", "UP"),
    ("Moradabad", "Uttar Pradesh", "UP"),
    ("Gandhinagar", "Gujarat", "GJ"),
    ("Shimla", "Himachal Pradesh", "HP"),
    ("Tiruppur", "Tamil Nadu", "TN"),
    ("Panipat", "Haryana", "HR"),
    ("Rourkela", "Odisha", "OD"),
    ("Rajahmundry", "Andhra Pradesh", "AP"),
    ("Bokaro", "Jharkhand", "JH"),
    ("Malappuram", "Kerala", "KL"),
];

/// `(alias, canonical name)`. Aliases are matched lower-cased.
pub(crate) const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("bangalore", "Bengaluru"),
    ("bengaluru urban", "Bengaluru"),
    ("bombay", "Mumbai"),
    ("new delhi", "Delhi"),
    ("delhi ncr", "Delhi"),
    ("madras", "Chennai"),
    ("calcutta", "Kolkata"),
    ("gurgaon", "Gurugram"),
    ("cochin", "Kochi"),
    ("trivandrum", "Thiruvananthapuram"),
    ("vizag", "Visakhapatnam"),
    ("mysore", "Mysuru"),
    ("mangalore", "Mangaluru"),
    ("trichy", "Tiruchirappalli"),
    ("belagavi", "Belgaum"),
    ("allahabad", "Prayagraj"),
    ("baroda", "Vadodara"),
    ("poona", "Pune"),
];

/// Two-letter postal codes for the 50 states plus DC.
pub(crate) const US_STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

pub(crate) const US_STATE_NAMES: &[&str] = &[
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
    "District of Columbia",
];

pub(crate) const US_CITIES: &[&str] = &[
    "Cincinnati",
    "West Chester",
    "New York",
    "San Francisco",
    "Los Angeles",
    "Seattle",
    "Austin",
    "Boston",
    "Chicago",
    "Denver",
    "Portland",
    "Miami",
    "Atlanta",
    "Dallas",
    "Houston",
    "Philadelphia",
    "San Diego",
    "San Jose",
    "Phoenix",
    "Las Vegas",
    "Detroit",
    "Minneapolis",
    "Tampa",
    "Charlotte",
    "Indianapolis",
    "Columbus",
    "Kansas City",
    "Nashville",
    "Milwaukee",
    "Raleigh",
    "Richmond",
    "Salt Lake City",
    "Pittsburgh",
    "Cleveland",
    "Baltimore",
    "Orlando",
    "Sacramento",
];

/// Country-level markers. `US` is matched with the two-letter code rules.
pub(crate) const US_COUNTRY_NAMES: &[&str] = &[
    "USA",
    "U.S.A.",
    "United States",
    "United States of America",
    "America",
];

pub(crate) const US_COUNTRY_CODES: &[&str] = &["US"];

pub(crate) const INTERNATIONAL_NAMES: &[&str] = &[
    "London",
    "United Kingdom",
    "England",
    "Manchester",
    "Birmingham",
    "Ireland",
    "Dublin",
    "Toronto",
    "Canada",
    "Vancouver",
    "Montreal",
    "Singapore",
    "Dubai",
    "Abu Dhabi",
    "United Arab Emirates",
    "Sydney",
    "Australia",
    "Melbourne",
    "Berlin",
    "Germany",
    "Munich",
    "Paris",
    "France",
    "Amsterdam",
    "Netherlands",
    "Tokyo",
    "Japan",
    "Beijing",
    "China",
    "Shanghai",
    "Hong Kong",
    "Seoul",
    "South Korea",
    "Bangkok",
    "Thailand",
    "Manila",
    "Philippines",
    "Jakarta",
    "Indonesia",
    "Kuala Lumpur",
    "Malaysia",
];

pub(crate) const INTERNATIONAL_CODES: &[&str] = &["UK", "UAE"];

/// Markers for postings with no usable geography.
pub(crate) const REMOTE_MARKERS: &[&str] = &[
    "Remote",
    "Worldwide",
    "Global",
    "International",
    "Anywhere",
    "Work From Home",
    "WFH",
];

/// A fragment equal to one of these marks the location as Indian; it is
/// never taken as a state.
pub(crate) const INDIA_MARKERS: &[&str] = &["india", "bharat"];
