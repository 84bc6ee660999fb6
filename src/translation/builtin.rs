/// Built-in Hebrew → English ingredient vocabulary.
///
/// Keys are already in normalized form (trimmed, lowercased).
pub const BUILTIN_TABLE: &[(&str, &str)] = &[
    ("אורז", "rice"),
    ("אפונה", "peas"),
    ("אבוקדו", "avocado"),
    ("אורגנו", "oregano"),
    ("אגוזי מלך", "walnuts"),
    ("בזיליקום", "basil"),
    ("בצל", "onion"),
    ("ביצה", "egg"),
    ("ביצים", "eggs"),
    ("במיה", "okra"),
    ("בננה", "banana"),
    ("בשר", "beef"),
    ("גזר", "carrot"),
    ("גבינה", "cheese"),
    ("גבינת קוטג", "cottage cheese"),
    ("דג", "fish"),
    ("דבש", "honey"),
    ("חלב", "milk"),
    ("חמאה", "butter"),
    ("חזה עוף", "chicken breast"),
    ("טונה", "tuna"),
    ("יוגורט", "yogurt"),
    ("כוסברה", "coriander"),
    ("כרוב", "cabbage"),
    ("כרובית", "cauliflower"),
    ("לימון", "lemon"),
    ("מלח", "salt"),
    ("מלפפון", "cucumber"),
    ("מיונז", "mayonnaise"),
    ("נענע", "mint"),
    ("סוכר", "sugar"),
    ("סלרי", "celery"),
    ("עגבניה", "tomato"),
    ("עגבניות", "tomatoes"),
    ("עוף", "chicken"),
    ("פילה סלמון", "salmon fillet"),
    ("פלפל", "pepper"),
    ("פטרוזיליה", "parsley"),
    ("פטריות", "mushrooms"),
    ("קמח", "flour"),
    ("קינואה", "quinoa"),
    ("קישוא", "zucchini"),
    ("קפה", "coffee"),
    ("שום", "garlic"),
    ("שמנת", "cream"),
    ("שעועית", "beans"),
    ("שקד", "almond"),
    ("תות", "strawberry"),
    ("תירס", "corn"),
    ("תפוז", "orange"),
    ("תפוח", "apple"),
    ("תפוח אדמה", "potato"),
    ("תרד", "spinach"),
    ("מים", "water"),
    ("שמן זית", "olive oil"),
    ("אורז בסמטי", "basmati rice"),
    ("בשר טחון", "ground beef"),
    ("לחם", "bread"),
    ("קמח חיטה", "wheat flour"),
    ("אבקת אפייה", "baking powder"),
    ("סודה לשתיה", "baking soda"),
    ("שמן", "oil"),
    ("אגוז", "nut"),
    ("שקדים", "almonds"),
];
