use crate::QueryDocument;

/// Hydrates index hits by id. Every list variable is sent, empty when a
/// chunk has no hits of that type.
pub static SITE_SEARCH: QueryDocument = QueryDocument::from_static(
    "SiteSearch",
    r#"
query SiteSearch($memberIds: [ItemId], $newsIds: [ItemId], $memberNewsIds: [ItemId], $first: IntType = 100, $skip: IntType = 0) {
  members: allMembers(filter: {id: {in: $memberIds}}, first: $first, skip: $skip) {
    __typename
    _modelApiKey
    id
    slug
    firstName
    lastName
    title: fullName
    text: bio
    region { id slug }
  }
  news: allNews(filter: {id: {in: $newsIds}}, first: $first, skip: $skip) {
    __typename
    _modelApiKey
    id
    slug
    title
    text: intro
    region { id slug }
  }
  memberNews: allMemberNews(filter: {id: {in: $memberNewsIds}}, first: $first, skip: $skip) {
    __typename
    _modelApiKey
    id
    slug
    title
    text: intro
    region { id slug }
  }
}
"#,
);

pub static SEARCH_MEMBERS: QueryDocument = QueryDocument::from_static(
    "SearchMembers",
    r#"
query SearchMembers($regionId: ItemId, $memberCategoryIds: [ItemId], $first: IntType = 100, $skip: IntType = 0) {
  members: allMembers(
    filter: {region: {eq: $regionId}, memberCategory: {anyIn: $memberCategoryIds}}
    orderBy: lastName_ASC
    first: $first
    skip: $skip
  ) {
    __typename
    id
    slug
    firstName
    lastName
    region { id slug }
  }
  pagination: _allMembersMeta(filter: {region: {eq: $regionId}, memberCategory: {anyIn: $memberCategoryIds}}) {
    count
  }
}
"#,
);

pub static SEARCH_MEMBERS_FREE: QueryDocument = QueryDocument::from_static(
    "SearchMembersFree",
    r#"
query SearchMembersFree($query: String, $regionId: ItemId, $memberCategoryIds: [ItemId], $first: IntType = 100, $skip: IntType = 0) {
  members: allMembers(
    filter: {
      region: {eq: $regionId}
      memberCategory: {anyIn: $memberCategoryIds}
      OR: [
        {firstName: {matches: {pattern: $query, caseSensitive: false}}}
        {lastName: {matches: {pattern: $query, caseSensitive: false}}}
        {bio: {matches: {pattern: $query, caseSensitive: false}}}
      ]
    }
    orderBy: lastName_ASC
    first: $first
    skip: $skip
  ) {
    __typename
    id
    slug
    firstName
    lastName
    region { id slug }
  }
  pagination: _allMembersMeta(
    filter: {
      region: {eq: $regionId}
      memberCategory: {anyIn: $memberCategoryIds}
      OR: [
        {firstName: {matches: {pattern: $query, caseSensitive: false}}}
        {lastName: {matches: {pattern: $query, caseSensitive: false}}}
        {bio: {matches: {pattern: $query, caseSensitive: false}}}
      ]
    }
  ) {
    count
  }
}
"#,
);

pub static ALL_MEMBERS: QueryDocument = QueryDocument::from_static(
    "AllMembers",
    r#"
query AllMembers($first: IntType = 100, $skip: IntType = 0) {
  members: allMembers(first: $first, skip: $skip, orderBy: lastName_ASC) {
    id
    slug
    region { id slug }
  }
  pagination: _allMembersMeta {
    count
  }
}
"#,
);

pub static ALL_NEWS: QueryDocument = QueryDocument::from_static(
    "AllNews",
    r#"
query AllNews($first: IntType = 100, $skip: IntType = 0) {
  news: allNews(first: $first, skip: $skip, orderBy: date_DESC) {
    id
    slug
    region { id slug }
  }
  pagination: _allNewsMeta {
    count
  }
}
"#,
);

pub static ALL_MEMBER_NEWS: QueryDocument = QueryDocument::from_static(
    "AllMemberNews",
    r#"
query AllMemberNews($first: IntType = 100, $skip: IntType = 0) {
  memberNews: allMemberNews(first: $first, skip: $skip, orderBy: date_DESC) {
    id
    slug
    region { id slug }
  }
  pagination: _allMemberNewsMeta {
    count
  }
}
"#,
);

pub static ALL_REGIONS: QueryDocument = QueryDocument::from_static(
    "AllRegions",
    r#"
query AllRegions($first: IntType = 100, $skip: IntType = 0) {
  regions: allRegions(first: $first, skip: $skip, orderBy: position_ASC) {
    id
    slug
    global
  }
  pagination: _allRegionsMeta {
    count
  }
}
"#,
);
