// Static lookup tables used to generate seed records.

/// Each country with ten location name fragments used for image names.
pub static COUNTRIES: [(&str, [&str; 10]); 8] = [
    (
        "Japan",
        [
            "Mount-Fuji-Sunrise",
            "Tokyo-Tower-Night",
            "Osaka-Castle-Spring",
            "Kyoto-Temple-Autumn",
            "Shibuya-Crossing",
            "Nara-Deer-Park",
            "Hakone-Lake-View",
            "Hiroshima-Peace-Memorial",
            "Nikko-Shrine",
            "Hokkaido-Snow-Festival",
        ],
    ),
    (
        "Korea",
        [
            "Seoul-Tower-Sunset",
            "Gyeongbokgung-Palace",
            "Busan-Beach-Summer",
            "Jeju-Island-Waterfall",
            "Myeongdong-Shopping",
            "Namsan-Park",
            "Lotte-World-Tower",
            "Gangnam-District",
            "Incheon-Bridge",
            "Seoraksan-Mountain",
        ],
    ),
    (
        "China",
        [
            "Great-Wall-Beijing",
            "Shanghai-Skyline",
            "Forbidden-City",
            "Terracotta-Warriors",
            "West-Lake-Hangzhou",
            "Guilin-Mountains",
            "Zhangjiajie-Avatar",
            "Huangshan-Yellow-Mountain",
            "Lijiang-Old-Town",
            "Chengdu-Panda-Base",
        ],
    ),
    (
        "Taiwan",
        [
            "Taipei-101-Night",
            "Taroko-Gorge",
            "Sun-Moon-Lake",
            "Jiufen-Old-Street",
            "Alishan-Sunrise",
            "Kenting-Beach",
            "Yehliu-Geopark",
            "Tainan-Temple",
            "Kaohsiung-Harbor",
            "Hualien-Coast",
        ],
    ),
    (
        "Vietnam",
        [
            "Halong-Bay-Cruise",
            "Hanoi-Old-Quarter",
            "Hoi-An-Lanterns",
            "Saigon-Notre-Dame",
            "Mekong-Delta",
            "Sapa-Rice-Terraces",
            "Hue-Imperial-City",
            "Danang-Golden-Bridge",
            "Nha-Trang-Beach",
            "Phong-Nha-Cave",
        ],
    ),
    (
        "Singapore",
        [
            "Marina-Bay-Sands",
            "Gardens-By-The-Bay",
            "Merlion-Park",
            "Sentosa-Island",
            "Orchard-Road",
            "Clarke-Quay-Night",
            "Singapore-Flyer",
            "Chinatown-Heritage",
            "Little-India",
            "Universal-Studios",
        ],
    ),
    (
        "Malaysia",
        [
            "Petronas-Towers",
            "Batu-Caves",
            "Penang-Street-Art",
            "Langkawi-Beach",
            "Cameron-Highlands",
            "Malacca-River",
            "KL-Tower-View",
            "Genting-Highlands",
            "Borneo-Rainforest",
            "Perhentian-Islands",
        ],
    ),
    (
        "Indonesia",
        [
            "Bali-Rice-Terraces",
            "Borobudur-Temple",
            "Jakarta-Monument",
            "Komodo-Dragon",
            "Bromo-Volcano",
            "Ubud-Monkey-Forest",
            "Gili-Islands",
            "Yogyakarta-Palace",
            "Raja-Ampat-Diving",
            "Lombok-Waterfall",
        ],
    ),
];

/// Wholesaler names attached to generated related-program entries.
pub static WHOLESALERS: [&str; 5] = [
    "TTN PLUS",
    "Tokyo Easy",
    "Seoul Express",
    "China Grand",
    "Asia Dream",
];

pub fn country_names() -> impl Iterator<Item = &'static str> {
    COUNTRIES.iter().map(|(country, _)| *country)
}

/// Every (country, location) pair in table order.
pub fn all_locations() -> Vec<(&'static str, &'static str)> {
    COUNTRIES
        .iter()
        .flat_map(|(country, locations)| locations.iter().map(move |loc| (*country, *loc)))
        .collect()
}
