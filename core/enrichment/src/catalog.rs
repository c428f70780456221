//! Browse sections shown on the home, trending and songs pages

use anilist::{MediaFormat, MediaSort, PageQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowseSection {
    /// Hero row on the home page
    Trending,
    TopAiring,
    MostPopular,
    MostViewed,
    PopularMovies,
    /// Song list on the top songs page
    TopSongs,
    /// Left-hand list on the trending clips page
    TrendingClips,
}

impl BrowseSection {
    pub const HOME: [BrowseSection; 5] = [
        BrowseSection::Trending,
        BrowseSection::TopAiring,
        BrowseSection::MostPopular,
        BrowseSection::MostViewed,
        BrowseSection::PopularMovies,
    ];

    pub fn title(self) -> &'static str {
        match self {
            BrowseSection::Trending => "Trending Anime",
            BrowseSection::TopAiring => "Top Anime Airing",
            BrowseSection::MostPopular => "Most Popular Anime",
            BrowseSection::MostViewed => "Most Viewed Anime",
            BrowseSection::PopularMovies => "Popular Anime Movies",
            BrowseSection::TopSongs => "Top Songs",
            BrowseSection::TrendingClips => "Trending Anime",
        }
    }

    /// Catalog page query backing this section
    pub fn page_query(self) -> PageQuery {
        match self {
            BrowseSection::Trending => PageQuery::new(3).sorted(MediaSort::TrendingDesc),
            BrowseSection::TopAiring => PageQuery::new(15).sorted(MediaSort::TrendingDesc),
            BrowseSection::MostPopular => PageQuery::new(10).sorted(MediaSort::PopularityDesc),
            BrowseSection::MostViewed => PageQuery::new(10).sorted(MediaSort::FavouritesDesc),
            BrowseSection::PopularMovies => PageQuery::new(10)
                .sorted(MediaSort::PopularityDesc)
                .with_format(MediaFormat::Movie),
            BrowseSection::TopSongs => PageQuery::new(10).sorted(MediaSort::PopularityDesc),
            BrowseSection::TrendingClips => PageQuery::new(50).sorted(MediaSort::PopularityDesc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movies_section_filters_format() {
        let query = BrowseSection::PopularMovies.page_query();
        assert_eq!(query.format, Some(MediaFormat::Movie));
        assert_eq!(query.per_page, 10);
    }

    #[test]
    fn test_home_sections_sizes() {
        let sizes: Vec<u32> = BrowseSection::HOME
            .iter()
            .map(|s| s.page_query().per_page)
            .collect();
        assert_eq!(sizes, vec![3, 15, 10, 10, 10]);
    }
}
