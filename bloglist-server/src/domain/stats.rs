//! Aggregate views over a loaded blog collection.
//!
//! All functions are pure and scan the input in order; on ties the
//! earlier-seen candidate wins (strict `>` comparison throughout).

use std::collections::HashMap;

use super::blog::Blog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FavoriteBlog {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TopBlogger {
    pub(crate) author: String,
    pub(crate) blogs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TopLikedAuthor {
    pub(crate) author: String,
    pub(crate) likes: i64,
}

pub(crate) fn total_likes(blogs: &[Blog]) -> i64 {
    blogs.iter().map(|blog| blog.likes).sum()
}

pub(crate) fn favorite_blog(blogs: &[Blog]) -> FavoriteBlog {
    let mut favorite = FavoriteBlog {
        title: String::new(),
        author: String::new(),
        likes: 0,
    };

    for blog in blogs {
        if blog.likes > favorite.likes {
            favorite = FavoriteBlog {
                title: blog.title.clone(),
                author: blog.author.clone(),
                likes: blog.likes,
            };
        }
    }
    favorite
}

pub(crate) fn most_blogs(blogs: &[Blog]) -> TopBlogger {
    if blogs.is_empty() {
        return TopBlogger {
            author: String::new(),
            blogs: 0,
        };
    }
    if let [only] = blogs {
        return TopBlogger {
            author: only.author.clone(),
            blogs: 1,
        };
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut top_author = "";
    let mut top_count = 0;

    for blog in blogs {
        let count = counts.entry(blog.author.as_str()).or_insert(0);
        *count += 1;
        if *count > top_count {
            top_count = *count;
            top_author = blog.author.as_str();
        }
    }

    TopBlogger {
        author: top_author.to_string(),
        blogs: top_count,
    }
}

pub(crate) fn most_likes(blogs: &[Blog]) -> TopLikedAuthor {
    if blogs.is_empty() {
        return TopLikedAuthor {
            author: String::new(),
            likes: 0,
        };
    }
    if let [only] = blogs {
        return TopLikedAuthor {
            author: only.author.clone(),
            likes: only.likes,
        };
    }

    let mut totals: HashMap<&str, i64> = HashMap::new();
    let mut top_author = "";
    let mut top_likes = 0;

    for blog in blogs {
        let total = totals.entry(blog.author.as_str()).or_insert(0);
        *total += blog.likes;
        if *total > top_likes {
            top_likes = *total;
            top_author = blog.author.as_str();
        }
    }

    TopLikedAuthor {
        author: top_author.to_string(),
        likes: top_likes,
    }
}
