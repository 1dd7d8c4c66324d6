//! Multi-tenant hosting domains
//!
//! Repository hosts serve independent third-party content per path, so a
//! domain-level reputation verdict is meaningless there: one starred repo
//! must not vouch for every other repo on the host. For these domains the
//! resolver matches the specific path-bearing URL or nothing at all.

/// Hosts where domain-only fallback matching is disabled.
pub const MULTI_TENANT_HOSTS: &[&str] = &["github.com", "gitlab.com", "sourceforge.net"];

/// True when `host` is a multi-tenant hosting domain or a subdomain of one.
pub fn is_multi_tenant_host(host: &str) -> bool {
    MULTI_TENANT_HOSTS.iter().any(|domain| {
        host == *domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_hosts() {
        assert!(is_multi_tenant_host("github.com"));
        assert!(is_multi_tenant_host("gitlab.com"));
        assert!(is_multi_tenant_host("sourceforge.net"));
    }

    #[test]
    fn test_subdomains() {
        assert!(is_multi_tenant_host("gist.github.com"));
        assert!(is_multi_tenant_host("downloads.sourceforge.net"));
    }

    #[test]
    fn test_lookalikes_are_not_multi_tenant() {
        assert!(!is_multi_tenant_host("notgithub.com"));
        assert!(!is_multi_tenant_host("github.com.evil.net"));
        assert!(!is_multi_tenant_host("example.com"));
    }
}
