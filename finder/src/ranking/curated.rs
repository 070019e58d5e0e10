//! Hand-picked products used to pad short result lists.

use url::Url;

use crate::links::is_product_link;
use crate::models::{
    CandidateSource, ColorFamily, ItemType, Reachability, ResolvedCandidate, SearchCandidate,
};

use super::price::{estimated_range, extract_price};

struct CuratedEntry {
    title: &'static str,
    link: &'static str,
    direct_link: &'static str,
    image: &'static str,
    snippet: &'static str,
    price: &'static str,
}

const BOTTINES_MARRON: &[CuratedEntry] = &[
    CuratedEntry {
        title: "Bottines Chelsea en cuir brun - Clarks Desert Chelsea",
        link: "https://www.clarks.fr/c/desert-chelsea-2/26078358.html",
        direct_link: "https://www.clarks.fr/c/desert-chelsea-2/26078358.html",
        image: "https://clarks.scene7.com/is/image/Pangaea2Build/26078358_W_1?wid=2000&hei=2000&fmt=jpg",
        snippet: "Bottines Chelsea en cuir marron premium, semelle en caoutchouc, doublure en cuir respirant.",
        price: "€159,95",
    },
    CuratedEntry {
        title: "Bottines à lacets marron - Timberland Premium 6-inch",
        link: "https://www.timberland.fr/shop/fr/tbl-fr/6-inch-premium-boots-pour-homme-en-marron-10001",
        direct_link: "https://www.timberland.fr/shop/fr/tbl-fr/6-inch-premium-boots-pour-homme-en-marron-10001",
        image: "https://images.timberland.com/is/image/timberland/10001713-HERO?$PDP-FULL-IMAGE$",
        snippet: "Bottines iconiques en cuir imperméable marron, col rembourré, semelle anti-fatigue.",
        price: "€219,00",
    },
    CuratedEntry {
        title: "Bottines cuir marron - Red Wing Iron Ranger",
        link: "https://www.redwingshoes.com/heritage/mens/iron-ranger/iron-ranger-08111.html",
        direct_link: "https://www.redwingshoes.com/heritage/mens/iron-ranger/iron-ranger-08111.html",
        image: "https://embed.widencdn.net/img/redwing/bexlfsgl2x/600x600px/RW08111_MUL_N1_0181_2_3.jpeg?position=s&crop=no&color=EDE8DD",
        snippet: "Bottines artisanales en cuir huilé marron, bout renforcé, semelle Vibram durable.",
        price: "€349,00",
    },
    CuratedEntry {
        title: "Boots en cuir marron - Dr. Martens 1460",
        link: "https://www.drmartens.com/fr/fr/1460-smooth-leather-lace-up-boots/p/11822212",
        direct_link: "https://www.drmartens.com/fr/fr/1460-smooth-leather-lace-up-boots/p/11822212",
        image: "https://i1.adis.ws/i/drmartens/11822212.80.jpg?$medium$",
        snippet: "Boots emblématiques en cuir lisse marron, 8 œillets, coutures jaunes, semelle AirWair.",
        price: "€199,00",
    },
    CuratedEntry {
        title: "Chelsea Boots Marron - Selected Homme",
        link: "https://www.zalando.fr/selected-homme-slhlouis-chelsea-boot-bottines-marron-se622d0dy-o11.html",
        direct_link: "https://www.zalando.fr/article/se622d0dy-o11",
        image: "https://img01.ztat.net/article/spp-media-p1/a6197bafdc5a30a0aae695ef968a5816/ab0df851ee7a48ebb7a4e337997723e3.jpg?imwidth=1800",
        snippet: "Chelsea boots élégants en cuir marron, élastiques latéraux, bout légèrement pointu.",
        price: "€129,95",
    },
];

const SACS_MARRON: &[CuratedEntry] = &[
    CuratedEntry {
        title: "Sacoche en cuir marron - The Bridge Story Uomo",
        link: "https://www.thebridgeonlineshop.com/fr/pc_sacoches_the_bridge_story_uomo_marron_cuir_retro_06460001-14.html",
        direct_link: "https://www.thebridgeonlineshop.com/fr/pc_sacoches_the_bridge_story_uomo_marron_cuir_retro_06460001-14.html",
        image: "https://www.thebridgeonlineshop.com/images/products/xxlarge/06460001-14_1.jpg",
        snippet: "Sacoche en cuir pleine fleur marron, design vintage avec finitions métal antique.",
        price: "€299,00",
    },
    CuratedEntry {
        title: "Messenger Bag Marron - Fossil Buckner",
        link: "https://www.fossil.com/fr-fr/products/buckner-messenger/MBG9374200.html",
        direct_link: "https://www.fossil.com/fr-fr/products/buckner-messenger/MBG9374200.html",
        image: "https://fossil.scene7.com/is/image/FossilPartners/MBG9374200_main?$sfcc_fos_large$",
        snippet: "Sacoche en cuir marron avec fermoir magnétique, poches intérieures, bandoulière ajustable.",
        price: "€249,00",
    },
    CuratedEntry {
        title: "Sac à bandoulière cuir marron - Lancaster Soft Vintage",
        link: "https://www.lancaster.fr/fr/messenger-homme/soft-vintage-messenger-homme-marron-fonce.html",
        direct_link: "https://www.lancaster.fr/fr/messenger-homme/soft-vintage-messenger-homme-marron-fonce.html",
        image: "https://www.lancaster.fr/media/catalog/product/s/o/soft-vintage-3-messenger-homme-marron-fonce-3.jpg",
        snippet: "Sacoche horizontale en cuir de vachette, format A4, fermeture zippée, doublure coton.",
        price: "€189,00",
    },
    CuratedEntry {
        title: "Sacoche bandoulière marron - Tommy Hilfiger Essential",
        link: "https://fr.tommy.com/sacoche-bandouliere-en-cuir-essential-am0am08535gae",
        direct_link: "https://fr.tommy.com/sacoche-bandouliere-en-cuir-essential-am0am08535gae",
        image: "https://tommy-europe.scene7.com/is/image/TommyEurope/AM0AM08535_GAE_main?$main@2x$",
        snippet: "Sacoche compacte en cuir marron avec logo métallique, compartiment principal zippé.",
        price: "€149,90",
    },
    CuratedEntry {
        title: "Sac bandoulière cuir marron - Le Tanneur Bruno",
        link: "https://www.letanneur.com/fr-fr/p/bruno-sac-bandouliere-homme-tltm2110",
        direct_link: "https://www.letanneur.com/fr-fr/p/bruno-sac-bandouliere-homme-tltm2110",
        image: "https://www.letanneur.com/media/catalog/product/t/l/tltm2110_899_1.jpg",
        snippet: "Sac messager en cuir de vachette pleine fleur, format A5, poche extérieure zippée.",
        price: "€280,00",
    },
];

const ROBES_BLEU: &[CuratedEntry] = &[
    CuratedEntry {
        title: "Robe de soirée élégante avec cape - Noir/Bleu Marine",
        link: "https://www.ralphlauren.fr/fr/robe-de-cocktail-a-cape-en-georgette-3616533815713.html",
        direct_link: "https://www.ralphlauren.fr/fr/robe-de-cocktail-a-cape-en-georgette-3616533815713.html",
        image: "https://www.ralphlauren.fr/dw/image/v2/BFQN_PRD/on/demandware.static/-/Sites-rl-products/default/dwe38c9683/images/524867/524867_3001399_pdl.jpg",
        snippet: "Robe élégante à cape, idéale pour les événements formels et cocktails.",
        price: "€299,00",
    },
    CuratedEntry {
        title: "Robe de Cocktail Cape - Bleu Marine",
        link: "https://fr.shein.com/Cape-Sleeve-Belted-Navy-Pencil-Dress-p-10351290-cat-1727.html",
        direct_link: "https://fr.shein.com/Cape-Sleeve-Belted-Navy-Pencil-Dress-p-10351290-cat-1727.html",
        image: "https://img.ltwebstatic.com/images3_pi/2022/12/29/1672297837a31ec85513e2397c9eb0e6c21e3c86a2_thumbnail_600x.jpg",
        snippet: "Robe fourreau élégante avec cape et ceinture, parfaite pour les occasions spéciales.",
        price: "€22,00",
    },
    CuratedEntry {
        title: "Robe Élégante Midi avec Cape - Collection Soirée",
        link: "https://www.asos.com/fr/asos-design/asos-design-robe-mi-longue-avec-cape-en-crepe/prd/203080653",
        direct_link: "https://www.asos.com/fr/prd/203080653",
        image: "https://images.asos-media.com/products/asos-design-robe-mi-longue-avec-cape-en-crepe/203080653-1-navy",
        snippet: "Robe midi élégante avec cape intégrée, coupe fluide et ceinture fine.",
        price: "€69,99",
    },
    CuratedEntry {
        title: "Robe Cape Chic - Bleu Nuit",
        link: "https://www2.hm.com/fr_fr/productpage.1115237001.html",
        direct_link: "https://www2.hm.com/fr_fr/productpage.1115237001.html",
        image: "https://lp2.hm.com/hmgoepprod?set=quality%5B79%5D%2Csource%5B%2F15%2F55%2F15551f6f6719e23707eea5dd232d8333adb2318b.jpg%5D%2Corigin%5Bdam%5D%2Ccategory%5B%5D%2Ctype%5BLOOKBOOK%5D%2Cres%5Bm%5D%2Chmver%5B1%5D&call=url[file:/product/main]",
        snippet: "Robe élégante avec effet cape, silhouette structurée et coupe mi-longue.",
        price: "€49,99",
    },
    CuratedEntry {
        title: "Cape-Effect Midi Dress - Navy Blue",
        link: "https://www.zara.com/fr/fr/robe-mi-longue-effet-cape-p02731168.html",
        direct_link: "https://www.zara.com/fr/fr/-p02731168.html",
        image: "https://static.zara.net/photos///2023/I/0/1/p/2731/168/401/2/w/563/2731168401_1_1_1.jpg?ts=1693305323400",
        snippet: "Robe mi-longue avec effet cape élégant, en tissu fluide et coupe structurée.",
        price: "€59,95",
    },
];

const DEFAULT: &[CuratedEntry] = &[
    CuratedEntry {
        title: "Article Mode Tendance - Collection Actuelle",
        link: "https://www.zalando.fr/mode/",
        direct_link: "https://www.zalando.fr/mode/",
        image: "https://img01.ztat.net/article/spp-media-p1/7df308f9c58a3f488652317f6786ee72/dd02f2e6e2a245b0a89c61a113d56a96.jpg",
        snippet: "Découvrez les dernières tendances mode, tous styles et toutes marques.",
        price: "€49,95",
    },
    CuratedEntry {
        title: "Vêtements et Accessoires de Qualité",
        link: "https://www2.hm.com/fr_fr/index.html",
        direct_link: "https://www2.hm.com/fr_fr/index.html",
        image: "https://lp2.hm.com/hmgoepprod?source=url[https://www2.hm.com/content/dam/TOOLBOX/PRE_SEASON/2022_pss/March_2022/Startpage_1_1_Trend.jpg]&scale=size[960]&sink=format[jpeg],quality[80]",
        snippet: "Mode femme, homme et enfant au meilleur prix, collections exclusives et nouvelles tendances.",
        price: "",
    },
    CuratedEntry {
        title: "Nouveautés Mode - Les essentiels du moment",
        link: "https://www.asos.com/fr/nouveautes/cat/?cid=27108",
        direct_link: "https://www.asos.com/fr/nouveautes/cat/?cid=27108",
        image: "https://images.asos-media.com/products/asos-design-ensemble-sweat-a-capuche-et-jogger-oversize-noir/204050837-1-black",
        snippet: "Découvrez les nouveautés mode pour femme et homme, mises à jour quotidiennement. Livraison et retours gratuits.",
        price: "",
    },
    CuratedEntry {
        title: "Collection Automne-Hiver - Vêtements tendance",
        link: "https://www.zara.com/fr/",
        direct_link: "https://www.zara.com/fr/",
        image: "https://static.zara.net/photos///2022/I/0/1/p/7901/423/712/2/w/850/7901423712_1_1_1.jpg",
        snippet: "Découvrez les nouvelles collections de vêtements, chaussures et accessoires pour femme, homme et enfant.",
        price: "",
    },
    CuratedEntry {
        title: "Mode éthique et responsable - Vêtements durables",
        link: "https://www.veja-store.com/fr/",
        direct_link: "https://www.veja-store.com/fr/",
        image: "https://www.veja-store.com/media/catalog/product/cache/4d7748d1b22d0fb94ae7e27ea11d5a07/v/e/veja_v-10_cwl_white_natural_cobalt_purple_vx022426a_lateral.jpg",
        snippet: "Marque pionnière de la mode responsable, matières biologiques et commerce équitable.",
        price: "",
    },
];

/// A named curated product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuratedSet {
    BottinesMarron,
    SacsMarron,
    RobesBleu,
    Default,
}

impl CuratedSet {
    pub const ALL: [CuratedSet; 4] = [
        CuratedSet::BottinesMarron,
        CuratedSet::SacsMarron,
        CuratedSet::RobesBleu,
        CuratedSet::Default,
    ];

    /// The set matching an item type and colour family, `Default` otherwise.
    pub fn for_target(item_type: ItemType, family: ColorFamily) -> Self {
        match (item_type, family) {
            (ItemType::Chaussure, ColorFamily::Brown) => CuratedSet::BottinesMarron,
            (ItemType::Sac, ColorFamily::Brown) => CuratedSet::SacsMarron,
            (ItemType::Vetement, ColorFamily::Blue) => CuratedSet::RobesBleu,
            _ => CuratedSet::Default,
        }
    }

    /// Like [`CuratedSet::for_target`], taking an optional colour name.
    pub fn for_color_name(item_type: ItemType, color: Option<&str>) -> Self {
        let family = color.map(ColorFamily::from_name).unwrap_or(ColorFamily::Other);
        Self::for_target(item_type, family)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CuratedSet::BottinesMarron => "bottines_marron",
            CuratedSet::SacsMarron => "sacs_marron",
            CuratedSet::RobesBleu => "robes_bleu",
            CuratedSet::Default => "default",
        }
    }

    pub fn entries(&self) -> Vec<ResolvedCandidate> {
        let raw = match self {
            CuratedSet::BottinesMarron => BOTTINES_MARRON,
            CuratedSet::SacsMarron => SACS_MARRON,
            CuratedSet::RobesBleu => ROBES_BLEU,
            CuratedSet::Default => DEFAULT,
        };
        raw.iter().map(to_candidate).collect()
    }

    /// Entries to pad with: this set, then the default set, then every
    /// other set in declaration order.
    pub fn padding_order(&self) -> Vec<ResolvedCandidate> {
        let mut order = vec![*self];
        if *self != CuratedSet::Default {
            order.push(CuratedSet::Default);
        }
        let rest: Vec<CuratedSet> = Self::ALL
            .into_iter()
            .filter(|set| !order.contains(set))
            .collect();
        order.extend(rest);

        order.iter().flat_map(|set| set.entries()).collect()
    }
}

/// Host as shown by search engines, "www." included.
fn display_host(link: &str) -> String {
    Url::parse(link)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

fn to_candidate(entry: &CuratedEntry) -> ResolvedCandidate {
    let price = extract_price(entry.price, "");
    let estimated = match price {
        Some(_) => None,
        None => Some(estimated_range(entry.title, entry.snippet)),
    };

    ResolvedCandidate {
        candidate: SearchCandidate {
            title: entry.title.to_string(),
            raw_link: entry.link.to_string(),
            display_domain: display_host(entry.link),
            snippet: entry.snippet.to_string(),
            raw_image: Some(entry.image.to_string()),
        },
        canonical_link: entry.direct_link.to_string(),
        is_direct_product_link: is_product_link(entry.direct_link),
        reachability: Reachability::Unknown,
        price,
        estimated_range: estimated,
        source: CandidateSource::Curated,
    }
}
