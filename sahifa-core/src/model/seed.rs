//! Demo data the backend falls back to whenever the persisted aggregate
//! is absent or carries an unexpected schema tag.

use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;

use super::aggregate::{Aggregate, DATA_VERSION};
use super::poll::{Poll, PollOption};
use super::post::Post;
use super::types::{PollId, PostId, PostStatus, Role, UserId};
use super::user::User;
use crate::text::normalize_paragraphs;

/// Build the default aggregate: two admin accounts, six published
/// articles, the homepage theme poll, and empty subscriber/rating
/// collections.
pub fn seed() -> Aggregate {
    let users = vec![
        User {
            id: UserId::new("user-admin"),
            name: "سارة المدير".to_string(),
            email: "admin@sahifa.com".to_string(),
            password: "sahifa123".to_string(),
            role: Role::Admin,
            avatar: Some("assets/images/thumb-5.svg".to_string()),
        },
        User {
            id: UserId::new("user-editor"),
            name: "أمجد المشرف".to_string(),
            email: "admin2@sahifa.com".to_string(),
            password: "secure123".to_string(),
            role: Role::Admin,
            avatar: Some("assets/images/thumb-4.svg".to_string()),
        },
    ];

    let posts = vec![
        demo_post(
            "post-1",
            "building-rational-discourse",
            "أسس بناء الخطاب العقلاني في مواجهة الشبهات",
            "أحمد السلمي",
            (2025, 2, 11),
            "logic",
            &["المنطق", "الفلسفة"],
            "قراءة في أدوات الخطاب العقلاني وطرائق إعداد الحجج المضادة للشبهات المعاصرة.",
            "assets/images/article-1.svg",
            "يحتاج الخطاب العقلاني إلى منظومة تجمع بين أصول المنطق ومناهج النقد وفهم التراث في سياقه.\n\nالخطوة الأولى هي تحليل بنية الشبهة وكشف المغالطة قبل الرد على المضمون، فكثير من الإشكالات تقوم على اقتطاع النصوص من بيئتها المعرفية.\n\nويبقى الهدف بناء ثقة معرفية تفتح باب الحوار الرشيد بعيداً عن الانغلاق.",
            24,
            9,
            8,
        ),
        demo_post(
            "post-2",
            "quranic-language-claims",
            "قراءة لغوية في الاعتراضات على النص القرآني",
            "ليلى الغامدي",
            (2025, 1, 24),
            "doubts",
            &["القرآن", "السنة"],
            "تحليل للسياقات اللغوية والبلاغية التي تُغفل عند طرح الاعتراضات على النص.",
            "assets/images/article-2.svg",
            "تبدأ المعالجة بإعادة النص إلى سياقه التداولي واستحضار فقه اللغة وتاريخ الألفاظ قبل مناقشة الاعتراض نفسه.",
            18,
            7,
            6,
        ),
        demo_post(
            "post-3",
            "prophethood-historical-method",
            "منهج إثبات النبوة بين النص والتاريخ",
            "سارة المدني",
            (2024, 12, 22),
            "prophethood",
            &["النبوة", "السيرة"],
            "جولة في المصادر التاريخية والتحليل النقدي لدعوى النبوة.",
            "assets/images/article-3.svg",
            "يستند إثبات النبوة إلى براهين مركبة تجمع شهادة النص والوقائع التاريخية والتحول الحضاري الذي أحدثه الوحي.",
            32,
            8,
            9,
        ),
        demo_post(
            "post-4",
            "intro-philosophy-of-logic",
            "مدخل إلى فلسفة المنطق ومناهج البرهنة",
            "د. يوسف الحمادي",
            (2024, 12, 5),
            "logic",
            &["المنطق"],
            "تأملات في صلة المنطق بالعلوم العقلية ومناهج الاستدلال الحديثة.",
            "assets/images/article-4.svg",
            "يستعيد المقال أساسات المنطق الصوري ثم يصلها بمباحث الاستدلال المعاصر مع موازنة بين المدارس.",
            11,
            6,
            7,
        ),
        demo_post(
            "post-5",
            "divine-justice-debates",
            "العدل الإلهي بين المدارس الكلامية والفلسفية",
            "مروان الراشد",
            (2024, 11, 18),
            "theology",
            &["العقيدة", "العدالة"],
            "تحقيق في مباحث العدل الإلهي ونقاط الالتقاء والاختلاف بين المقاربات.",
            "assets/images/article-5.svg",
            "يوازن المقال بين المعالجة الكلامية التقليدية ومقاربات الفلسفة الأخلاقية المعاصرة لقضية العدل.",
            27,
            9,
            5,
        ),
        demo_post(
            "post-6",
            "certainty-islamic-epistemology",
            "اليقين وقنواته في نظرية المعرفة الإسلامية",
            "آمنة الأنصاري",
            (2024, 10, 29),
            "philosophy",
            &["الفلسفة", "الابستمولوجيا"],
            "عرض تحليلي لمفهوم المعرفة اليقينية عند علماء الإسلام.",
            "assets/images/article-6.svg",
            "يتناول المقال محاور المعرفة اليقينية وقنواتها في التراث مع مقارنة موجزة بالمدارس التحليلية.",
            9,
            5,
            8,
        ),
    ];

    let poll_id = PollId::new("homepage-theme");
    let mut options = BTreeMap::new();
    for (value, label, votes) in [
        ("light", "سمة مضيئة", 42),
        ("dark", "سمة داكنة", 24),
        ("sepia", "سمة دافئة", 12),
    ] {
        options.insert(
            value.to_string(),
            PollOption {
                value: value.to_string(),
                label: label.to_string(),
                votes,
            },
        );
    }
    let poll = Poll {
        id: poll_id.clone(),
        title: "أي سمة تفضل لعرض المقالات؟".to_string(),
        options,
    };

    let mut polls = BTreeMap::new();
    polls.insert(poll_id, poll);

    Aggregate {
        version: DATA_VERSION.to_string(),
        users,
        posts,
        polls,
        newsletter_subscribers: Vec::new(),
        ratings: BTreeMap::new(),
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_post(
    id: &str,
    slug: &str,
    title: &str,
    author: &str,
    (year, month, day): (i32, u32, u32),
    category: &str,
    tags: &[&str],
    excerpt: &str,
    image: &str,
    body: &str,
    comments: u32,
    trending_score: u32,
    recommended_score: u32,
) -> Post {
    Post {
        id: PostId::new(id),
        slug: slug.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        published_at: Utc.with_ymd_and_hms(year, month, day, 8, 0, 0).unwrap(),
        category: category.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        excerpt: excerpt.to_string(),
        hero_image: image.to_string(),
        card_image: image.to_string(),
        body: normalize_paragraphs(body),
        comments,
        status: PostStatus::Published,
        trending_score,
        recommended_score,
    }
}
